//! Crawl outcomes and aggregate reports

use crate::url::ResourceId;
use crate::SpindriftError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Why a crawl attempt was skipped without fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another branch already claimed the identifier.
    AlreadyVisited,

    /// The crawl was cancelled before this attempt started.
    Cancelled,

    /// The total-page budget was exhausted.
    BudgetExhausted,
}

/// Per-identifier result of one crawl attempt
#[derive(Debug)]
pub enum CrawlOutcome {
    /// Content was fetched from the network and persisted.
    Fetched,

    /// Content was already in the store; no fetch was issued.
    AlreadyCached,

    /// The attempt terminated without processing the identifier.
    Skipped(SkipReason),

    /// Fetching or processing failed; the subtree was not expanded.
    Failed(SpindriftError),
}

/// Aggregate result of a crawl subtree.
///
/// Every claimed identifier appears exactly once in `outcomes`; skipped
/// attempts (duplicate discoveries, cancellation, budget denials) are
/// tallied separately so an identifier reached via several paths is still
/// enumerated once.
#[derive(Debug)]
pub struct CrawlReport {
    outcomes: HashMap<ResourceId, CrawlOutcome>,
    skipped: u64,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl CrawlReport {
    pub(crate) fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            skipped: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records the outcome of one attempt on `id`.
    pub(crate) fn record(&mut self, id: ResourceId, outcome: CrawlOutcome) {
        match outcome {
            CrawlOutcome::Skipped(reason) => {
                tracing::trace!("Skipping {}: {:?}", id, reason);
                self.skipped += 1;
            }
            other => {
                self.outcomes.insert(id, other);
            }
        }
    }

    /// Folds a child subtree's report into this one.
    pub(crate) fn merge(&mut self, child: CrawlReport) {
        self.outcomes.extend(child.outcomes);
        self.skipped += child.skipped;
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Outcome for a specific identifier, if it was claimed during the crawl.
    pub fn outcome(&self, id: &ResourceId) -> Option<&CrawlOutcome> {
        self.outcomes.get(id)
    }

    /// All claimed identifiers with their outcomes.
    pub fn outcomes(&self) -> impl Iterator<Item = (&ResourceId, &CrawlOutcome)> {
        self.outcomes.iter()
    }

    /// Number of identifiers claimed during the crawl.
    pub fn visited(&self) -> usize {
        self.outcomes.len()
    }

    pub fn fetched(&self) -> u64 {
        self.count(|o| matches!(o, CrawlOutcome::Fetched))
    }

    pub fn cached(&self) -> u64 {
        self.count(|o| matches!(o, CrawlOutcome::AlreadyCached))
    }

    pub fn failed(&self) -> u64 {
        self.count(|o| matches!(o, CrawlOutcome::Failed(_)))
    }

    /// Number of attempts that were skipped (duplicates, cancellation,
    /// budget). Not keyed by identifier.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Every failure encountered anywhere in the crawl tree.
    pub fn errors(&self) -> impl Iterator<Item = (&ResourceId, &SpindriftError)> {
        self.outcomes.iter().filter_map(|(id, o)| match o {
            CrawlOutcome::Failed(e) => Some((id, e)),
            _ => None,
        })
    }

    /// True when no branch failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Wall-clock duration, once the crawl has finished.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        let timing = match self.duration() {
            Some(d) => format!(" in {}ms", d.num_milliseconds()),
            None => String::new(),
        };
        format!(
            "{} visited: {} fetched, {} cached, {} failed, {} skipped{}",
            self.visited(),
            self.fetched(),
            self.cached(),
            self.failed(),
            self.skipped(),
            timing
        )
    }

    fn count(&self, pred: impl Fn(&CrawlOutcome) -> bool) -> u64 {
        self.outcomes.values().filter(|o| pred(o)).count() as u64
    }
}
