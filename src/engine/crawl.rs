//! The crawl engine
//!
//! Drives the recursive traversal: claim the identifier, obtain its content
//! through the read-through store, extract links, dispatch children
//! concurrently, and join them all before reporting the subtree. A parent
//! never reports completion while descendants are still in flight.

use crate::engine::report::{CrawlOutcome, CrawlReport, SkipReason};
use crate::extract::LinkExtractor;
use crate::fetch::{Content, Fetcher};
use crate::store::ResourceStore;
use crate::url::ResourceId;
use crate::visited::{Claim, VisitedTracker};
use futures::future::{join_all, BoxFuture};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Tuning knobs for a [`CrawlEngine`]
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Maximum number of in-flight fetches, applied uniformly across all
    /// depths of the crawl tree.
    pub max_concurrent_fetches: usize,

    /// Optional cap on the total number of identifiers admitted per crawl.
    pub max_pages: Option<usize>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 8,
            max_pages: None,
        }
    }
}

/// Recursive, concurrent, deduplicated crawler.
///
/// The engine owns its collaborators; each call to [`CrawlEngine::crawl`]
/// runs with a fresh visited set, so dedup state never leaks between runs.
pub struct CrawlEngine {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    store: Arc<dyn ResourceStore>,
    options: EngineOptions,
    cancel: CancellationToken,
}

impl CrawlEngine {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
        store: Arc<dyn ResourceStore>,
    ) -> Self {
        Self::with_options(fetcher, extractor, store, EngineOptions::default())
    }

    pub fn with_options(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
        store: Arc<dyn ResourceStore>,
        options: EngineOptions,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            store,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Handle for requesting a graceful stop: no new fetches are issued,
    /// in-flight fetches settle, and partial results are still aggregated.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Crawls from `seed`, following links up to `max_depth` hops away.
    ///
    /// Depth 0 fetches (or cache-reads) the seed itself without expanding
    /// links. A branch failure is recorded in the report and never cancels
    /// its siblings.
    pub async fn crawl(&self, seed: ResourceId, max_depth: u32) -> CrawlReport {
        tracing::info!("Starting crawl of {} (max depth {})", seed, max_depth);

        let run = Arc::new(CrawlRun {
            fetcher: Arc::clone(&self.fetcher),
            extractor: Arc::clone(&self.extractor),
            store: Arc::clone(&self.store),
            visited: VisitedTracker::with_budget(self.options.max_pages),
            limiter: Semaphore::new(self.options.max_concurrent_fetches),
            cancel: self.cancel.clone(),
        });

        let mut report = Arc::clone(&run).crawl_node(seed, max_depth).await;
        report.finish();

        tracing::info!("Crawl finished: {}", report.summary());
        report
    }
}

/// Shared state of one top-level crawl invocation.
///
/// The visited tracker is created here and discarded with the run; the
/// store and collaborators are borrowed from the engine.
struct CrawlRun {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
    store: Arc<dyn ResourceStore>,
    visited: VisitedTracker,
    limiter: Semaphore,
    cancel: CancellationToken,
}

impl CrawlRun {
    /// Processes one identifier and its subtree.
    ///
    /// Returns the aggregate report for the subtree rooted at `id`; the
    /// future resolves only once every descendant has settled.
    fn crawl_node(self: Arc<Self>, id: ResourceId, depth: u32) -> BoxFuture<'static, CrawlReport> {
        Box::pin(async move {
            let mut report = CrawlReport::new();

            if self.cancel.is_cancelled() {
                report.record(id, CrawlOutcome::Skipped(SkipReason::Cancelled));
                return report;
            }

            match self.visited.claim(&id) {
                Claim::Admitted => {}
                Claim::AlreadyClaimed => {
                    report.record(id, CrawlOutcome::Skipped(SkipReason::AlreadyVisited));
                    return report;
                }
                Claim::BudgetExhausted => {
                    tracing::debug!("Page budget exhausted at {}", id);
                    report.record(id, CrawlOutcome::Skipped(SkipReason::BudgetExhausted));
                    return report;
                }
            }

            // The permit covers only the fetch-and-persist window. Holding
            // it across the child join would deadlock once the tree is
            // deeper than the permit count.
            let obtained = {
                let _permit = match self.limiter.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        report.record(id, CrawlOutcome::Skipped(SkipReason::Cancelled));
                        return report;
                    }
                };

                if self.cancel.is_cancelled() {
                    report.record(id, CrawlOutcome::Skipped(SkipReason::Cancelled));
                    return report;
                }

                self.read_or_fetch(&id).await
            };

            let (content, outcome) = match obtained {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!("Failed to obtain {}: {}", id, e);
                    report.record(id, CrawlOutcome::Failed(e));
                    return report;
                }
            };

            if depth == 0 {
                report.record(id, outcome);
                return report;
            }

            let links = match self.extractor.extract(&id, &content) {
                Ok(links) => links,
                Err(e) => {
                    tracing::warn!("Extraction failed for {}: {}", id, e);
                    report.record(id, CrawlOutcome::Failed(e.into()));
                    return report;
                }
            };

            tracing::debug!("{}: dispatching {} children at depth {}", id, links.len(), depth);

            let children = join_all(
                links
                    .into_iter()
                    .map(|link| Arc::clone(&self).crawl_node(link, depth - 1)),
            )
            .await;

            report.record(id, outcome);
            for child in children {
                report.merge(child);
            }
            report
        })
    }

    /// Read-through cache access: a hit returns the stored content, a miss
    /// fetches and persists before returning.
    ///
    /// Both paths resume the caller through the scheduler; a hit is never
    /// delivered on the initiator's own stack frame.
    async fn read_or_fetch(
        &self,
        id: &ResourceId,
    ) -> crate::Result<(Content, CrawlOutcome)> {
        if self.store.exists(id)? {
            let content = self.store.read(id)?;
            tracing::debug!("Cache hit for {}", id);
            tokio::task::yield_now().await;
            return Ok((content, CrawlOutcome::AlreadyCached));
        }

        let content = self.fetcher.fetch(id).await?;
        self.store.write(id, &content)?;
        Ok((content, CrawlOutcome::Fetched))
    }
}
