//! Consistency evaluator: AND-combines per-key hits for one candidate.

use std::cell::Cell;

use crate::key::QueryKeys;

/// Evaluation context for one query execution.
///
/// Holds the search-key count the host's check vectors are parallel to, so
/// judging a candidate never re-runs the decomposer. A context belongs to a
/// single execution and is not `Sync`.
#[derive(Debug)]
pub struct ConsistencyContext {
    key_count: usize,
    evaluations: Cell<u64>,
}

impl ConsistencyContext {
    /// Creates a context for a query with `key_count` search keys.
    #[must_use]
    pub fn new(key_count: usize) -> Self {
        Self {
            key_count,
            evaluations: Cell::new(0),
        }
    }

    /// Creates a context from already-extracted query keys.
    #[must_use]
    pub fn from_query(query: &QueryKeys) -> Self {
        Self::new(query.len())
    }

    /// Number of search keys per check vector.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.key_count
    }

    /// Number of candidates judged so far.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }

    /// Accepts a candidate iff every search key reported a hit.
    ///
    /// # Panics
    ///
    /// Panics if `check` has fewer entries than the context's key count.
    #[must_use]
    pub fn is_consistent(&self, check: &[bool]) -> bool {
        assert!(
            check.len() >= self.key_count,
            "check vector has {} entries, query has {} search keys",
            check.len(),
            self.key_count
        );
        self.evaluations.set(self.evaluations.get() + 1);
        check[..self.key_count].iter().all(|&hit| hit)
    }
}

/// Host-facing form of [`ConsistencyContext::is_consistent`].
#[must_use]
pub fn is_consistent(check: &[bool], context: &ConsistencyContext) -> bool {
    context.is_consistent(check)
}
