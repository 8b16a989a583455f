//! Visited tracking with atomic claim-or-skip semantics
//!
//! The tracker is the dedup point of the whole crawler: among any number of
//! concurrent callers for the same identifier, exactly one observes
//! [`Claim::Admitted`] and proceeds to fetch; everyone else backs off.
//! One tracker lives exactly as long as one top-level crawl.

use crate::url::ResourceId;
use std::collections::HashSet;
use std::sync::Mutex;

/// Result of attempting to claim an identifier for crawling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// This caller won the claim and must process the identifier.
    Admitted,

    /// Another caller already claimed the identifier.
    AlreadyClaimed,

    /// The total-page budget is spent; no new identifiers are admitted.
    BudgetExhausted,
}

/// Concurrency-safe set of claimed identifiers.
///
/// `claim` is linearizable per identifier: the membership check and the
/// insertion happen under one lock, so no two callers can both be admitted.
pub struct VisitedTracker {
    claimed: Mutex<HashSet<ResourceId>>,
    max_pages: Option<usize>,
}

impl VisitedTracker {
    /// Creates an empty tracker with no page budget.
    pub fn new() -> Self {
        Self::with_budget(None)
    }

    /// Creates an empty tracker admitting at most `max_pages` identifiers.
    pub fn with_budget(max_pages: Option<usize>) -> Self {
        Self {
            claimed: Mutex::new(HashSet::new()),
            max_pages,
        }
    }

    /// Atomically claims an identifier for this caller.
    pub fn claim(&self, id: &ResourceId) -> Claim {
        let mut claimed = self.claimed.lock().unwrap();

        if claimed.contains(id) {
            return Claim::AlreadyClaimed;
        }

        if let Some(budget) = self.max_pages {
            if claimed.len() >= budget {
                return Claim::BudgetExhausted;
            }
        }

        claimed.insert(id.clone());
        Claim::Admitted
    }

    /// Number of identifiers claimed so far.
    pub fn len(&self) -> usize {
        self.claimed.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for VisitedTracker {
    fn default() -> Self {
        Self::new()
    }
}
