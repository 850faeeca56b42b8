//! In-memory permuterm index over posting lists.
//!
//! Reference host for the key algorithms: stores every rotation key of every
//! document in an ordered map, probes it with the query's search keys using
//! the partial-match comparator, and combines the per-key hits with the
//! consistency evaluator.

use std::collections::BTreeMap;
use std::ops::Bound;

use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;

use super::posting_list::PostingList;
use crate::compare::{compare_keys, KeyMatch};
use crate::consistency::ConsistencyContext;
use crate::error::{Error, Result};
use crate::key::{Key, SearchKey, SENTINEL};
use crate::planner::QueryPlanner;
use crate::rotation::extract_stored_keys;

/// Statistics for the permuterm index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermutermStats {
    /// Number of indexed documents.
    pub doc_count: u64,
    /// Number of distinct rotation keys.
    pub key_count: usize,
    /// Sum of all posting list lengths.
    pub posting_entries: usize,
}

/// Permuterm inverted index: rotation key → documents.
///
/// Candidates returned by [`PermutermIndex::search_like`] are a superset of
/// the documents matching the pattern; the caller rechecks them.
#[derive(Debug, Default)]
pub struct PermutermIndex {
    /// Encoded rotation key → documents holding it, in key order.
    entries: BTreeMap<Vec<u8>, PostingList>,

    /// `doc_id` → encoded keys (for removal).
    doc_keys: FxHashMap<u64, Vec<Vec<u8>>>,

    /// All document IDs.
    all_docs: RoaringBitmap,
}

impl PermutermIndex {
    /// Create a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all_docs.is_empty()
    }

    /// Get the number of indexed documents.
    #[must_use]
    pub fn doc_count(&self) -> u64 {
        self.all_docs.len()
    }

    /// Returns true if `doc_id` is indexed.
    #[must_use]
    pub fn contains(&self, doc_id: u64) -> bool {
        u32::try_from(doc_id).is_ok_and(|id| self.all_docs.contains(id))
    }

    /// Insert a document; an existing document with the same ID is replaced.
    ///
    /// # Errors
    ///
    /// - [`Error::DocIdOutOfRange`] if `doc_id` exceeds `u32::MAX`;
    /// - [`Error::ReservedSentinel`] if `text` contains the sentinel byte.
    pub fn insert(&mut self, doc_id: u64, text: &str) -> Result<()> {
        let doc = u32::try_from(doc_id).map_err(|_| Error::DocIdOutOfRange(doc_id))?;
        if let Some(position) = text.bytes().position(|b| b == SENTINEL) {
            return Err(Error::ReservedSentinel { position });
        }

        if self.doc_keys.contains_key(&doc_id) {
            self.remove(doc_id);
        }

        let keys: Vec<Vec<u8>> = extract_stored_keys(text).iter().map(Key::encode).collect();
        for key in &keys {
            self.entries.entry(key.clone()).or_default().insert(doc);
        }

        tracing::debug!(doc_id, keys = keys.len(), "indexed rotation keys");

        self.doc_keys.insert(doc_id, keys);
        self.all_docs.insert(doc);
        Ok(())
    }

    /// Remove a document. Returns true if it was indexed.
    pub fn remove(&mut self, doc_id: u64) -> bool {
        let Some(keys) = self.doc_keys.remove(&doc_id) else {
            return false;
        };
        // Present in doc_keys implies it passed the u32 check on insert.
        let doc = doc_id as u32;

        for key in keys {
            if let Some(postings) = self.entries.get_mut(&key) {
                postings.remove(doc);
                if postings.is_empty() {
                    self.entries.remove(&key);
                }
            }
        }

        self.all_docs.remove(doc);
        tracing::debug!(doc_id, "removed rotation keys");
        true
    }

    /// Documents whose rotation keys satisfy one search key.
    ///
    /// Walks keys upward from the search key's body until the comparator
    /// signals a stop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedKey`] if a stored key fails to decode.
    pub fn scan(&self, search: &SearchKey) -> Result<RoaringBitmap> {
        let mut hits = RoaringBitmap::new();
        let start = search.key.body();
        let mut visited = 0usize;

        for (encoded, postings) in self
            .entries
            .range::<[u8], _>((Bound::Included(start), Bound::Unbounded))
        {
            visited += 1;
            let stored = Key::decode(encoded)?;
            match compare_keys(&stored, &search.key, search.partial_match) {
                KeyMatch::Match => postings.append_to(&mut hits),
                KeyMatch::Less if search.partial_match => {}
                KeyMatch::Less | KeyMatch::Greater => break,
            }
        }

        tracing::trace!(key = %search, visited, hits = hits.len(), "scanned search key");
        Ok(hits)
    }

    /// Search for documents matching a LIKE pattern.
    ///
    /// Returns candidate document IDs; a superset of the true matches since
    /// `_` and `%` are not distinguished and literal order is not checked.
    ///
    /// # Algorithm
    ///
    /// 1. Plan the search keys (decompose, optionally prune)
    /// 2. Scan each key, collecting its documents
    /// 3. Judge every document hit by any key with a [`ConsistencyContext`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedKey`] if a stored key fails to decode.
    pub fn search_like(&self, pattern: &str, planner: &QueryPlanner) -> Result<RoaringBitmap> {
        let query = planner.extract_query_keys(pattern);
        let per_key = query
            .iter()
            .map(|search| self.scan(search))
            .collect::<Result<Vec<_>>>()?;

        let candidates = per_key
            .iter()
            .fold(RoaringBitmap::new(), |acc, hits| acc | hits);

        let context = ConsistencyContext::from_query(&query);
        let mut check = vec![false; per_key.len()];
        let mut result = RoaringBitmap::new();

        for doc in &candidates {
            for (bit, hits) in check.iter_mut().zip(&per_key) {
                *bit = hits.contains(doc);
            }
            if context.is_consistent(&check) {
                result.insert(doc);
            }
        }

        tracing::debug!(
            pattern,
            keys = query.len(),
            candidates = candidates.len(),
            accepted = result.len(),
            "permuterm LIKE search"
        );

        Ok(result)
    }

    /// Get index statistics.
    #[must_use]
    pub fn stats(&self) -> PermutermStats {
        PermutermStats {
            doc_count: self.all_docs.len(),
            key_count: self.entries.len(),
            posting_entries: self.entries.values().map(PostingList::len).sum(),
        }
    }
}
