//! Thread-safe wrapper around [`PermutermIndex`].

use parking_lot::RwLock;
use roaring::RoaringBitmap;

use super::permuterm::{PermutermIndex, PermutermStats};
use crate::error::Result;
use crate::planner::QueryPlanner;

/// [`PermutermIndex`] behind a reader-writer lock.
///
/// Searches take the read lock and run in parallel; inserts and removals
/// take the write lock.
#[derive(Debug, Default)]
pub struct ConcurrentPermutermIndex {
    inner: RwLock<PermutermIndex>,
}

impl ConcurrentPermutermIndex {
    /// Create a new empty concurrent index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document (write lock).
    ///
    /// # Errors
    ///
    /// See [`PermutermIndex::insert`].
    pub fn insert(&self, doc_id: u64, text: &str) -> Result<()> {
        self.inner.write().insert(doc_id, text)
    }

    /// Remove a document (write lock).
    pub fn remove(&self, doc_id: u64) -> bool {
        self.inner.write().remove(doc_id)
    }

    /// Search for candidate documents (read lock).
    ///
    /// # Errors
    ///
    /// See [`PermutermIndex::search_like`].
    pub fn search_like(&self, pattern: &str, planner: &QueryPlanner) -> Result<RoaringBitmap> {
        self.inner.read().search_like(pattern, planner)
    }

    /// Get document count (read lock).
    #[must_use]
    pub fn doc_count(&self) -> u64 {
        self.inner.read().doc_count()
    }

    /// Get index statistics (read lock).
    #[must_use]
    pub fn stats(&self) -> PermutermStats {
        self.inner.read().stats()
    }
}
