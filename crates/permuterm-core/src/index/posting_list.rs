//! Adaptive posting list for rotation keys.
//!
//! Most rotation keys belong to a single word, so a key's posting list is
//! usually tiny. Very common words (and the empty-word marker) can collect
//! many documents. The list therefore switches representation:
//! - `FxHashSet<u32>` while small;
//! - `RoaringBitmap` from [`PROMOTION_THRESHOLD`] documents on;
//! - back to the set once removals shrink it below [`DEMOTION_THRESHOLD`].

use roaring::RoaringBitmap;
use rustc_hash::FxHashSet;

/// Cardinality at which a Small list becomes Large.
pub const PROMOTION_THRESHOLD: usize = 1000;

/// Cardinality below which a Large list becomes Small again.
pub const DEMOTION_THRESHOLD: usize = PROMOTION_THRESHOLD / 2;

/// Document IDs stored under one index key.
#[derive(Debug, Clone)]
pub enum PostingList {
    /// Hash set for low cardinality.
    Small(FxHashSet<u32>),
    /// Roaring bitmap for high cardinality.
    Large(RoaringBitmap),
}

impl Default for PostingList {
    fn default() -> Self {
        Self::new()
    }
}

impl PostingList {
    /// Creates an empty posting list (Small).
    #[must_use]
    pub fn new() -> Self {
        Self::Small(FxHashSet::default())
    }

    /// Adds a document. Returns true if it was not present.
    pub fn insert(&mut self, doc_id: u32) -> bool {
        let inserted = match self {
            Self::Small(set) => set.insert(doc_id),
            Self::Large(bitmap) => bitmap.insert(doc_id),
        };
        if matches!(self, Self::Small(set) if set.len() >= PROMOTION_THRESHOLD) {
            self.promote();
        }
        inserted
    }

    /// Removes a document. Returns true if it was present.
    pub fn remove(&mut self, doc_id: u32) -> bool {
        let removed = match self {
            Self::Small(set) => set.remove(&doc_id),
            Self::Large(bitmap) => bitmap.remove(doc_id),
        };
        if matches!(self, Self::Large(bitmap) if (bitmap.len() as usize) < DEMOTION_THRESHOLD) {
            self.demote();
        }
        removed
    }

    /// Returns true if the list holds `doc_id`.
    #[must_use]
    pub fn contains(&self, doc_id: u32) -> bool {
        match self {
            Self::Small(set) => set.contains(&doc_id),
            Self::Large(bitmap) => bitmap.contains(doc_id),
        }
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Small(set) => set.len(),
            Self::Large(bitmap) => bitmap.len() as usize,
        }
    }

    /// Returns true if no document is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for the Roaring representation.
    #[must_use]
    pub fn is_large(&self) -> bool {
        matches!(self, Self::Large(_))
    }

    /// Adds every listed document to `target`.
    pub fn append_to(&self, target: &mut RoaringBitmap) {
        match self {
            Self::Small(set) => target.extend(set.iter().copied()),
            Self::Large(bitmap) => *target |= bitmap,
        }
    }

    /// Iterates over the listed documents (unordered while Small).
    pub fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            Self::Small(set) => Box::new(set.iter().copied()),
            Self::Large(bitmap) => Box::new(bitmap.iter()),
        }
    }

    fn promote(&mut self) {
        if let Self::Small(set) = self {
            *self = Self::Large(set.iter().copied().collect());
        }
    }

    fn demote(&mut self) {
        if let Self::Large(bitmap) = self {
            *self = Self::Small(bitmap.iter().collect());
        }
    }
}
