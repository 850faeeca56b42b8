//! Key pruner: drops low-selectivity search keys to bound scan cost.
//!
//! Short keys with a loose positional constraint match a large share of the
//! index, so scanning them costs much and filters little. Since the keys of
//! one query are AND-combined, dropping some of them keeps the candidate set
//! a superset of the true matches; it only grows.
//!
//! The retention thresholds are tuning constants, not invariants:
//!
//! | Selectivity | Kept when                          |
//! |-------------|------------------------------------|
//! | `Bounded`   | always                             |
//! | `OneSided`  | `one_sided_factor * len > max_len` |
//! | `Unbounded` | `unbounded_factor * len > max_len` |

use std::fmt;

use crate::key::{Key, PositionFlags, SearchKey, SENTINEL};

/// Default factor for keys anchored at one end of the word.
pub const DEFAULT_ONE_SIDED_FACTOR: usize = 3;
/// Default factor for keys that may float anywhere.
pub const DEFAULT_UNBOUNDED_FACTOR: usize = 2;

/// How strongly a search key constrains the rotation it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySelectivity {
    /// Anchored at both ends (`X$Y`, exact keys, `BEGIN|END`).
    Bounded,
    /// Anchored at one end only (`BEGIN`, `END`, `Y$`).
    OneSided,
    /// Floating (`MIDDLE` present, or plain literal).
    Unbounded,
}

impl KeySelectivity {
    /// Classifies a search key.
    #[must_use]
    pub fn classify(search: &SearchKey) -> Self {
        match &search.key {
            Key::EmptyMarker => Self::Bounded,
            Key::Flagged { flags, .. } => {
                if flags.contains(PositionFlags::BEGIN | PositionFlags::END) {
                    Self::Bounded
                } else if !flags.intersects(PositionFlags::MIDDLE) {
                    Self::OneSided
                } else {
                    Self::Unbounded
                }
            }
            Key::Rotation(body) => {
                if body.last() != Some(&SENTINEL) || !search.partial_match {
                    Self::Bounded
                } else {
                    Self::OneSided
                }
            }
            Key::Literal(_) => Self::Unbounded,
        }
    }
}

/// Retention thresholds for [`SelectivityPruner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneThresholds {
    /// Multiplier applied to one-sided key lengths.
    pub one_sided_factor: usize,
    /// Multiplier applied to unbounded key lengths.
    pub unbounded_factor: usize,
}

impl Default for PruneThresholds {
    fn default() -> Self {
        Self {
            one_sided_factor: DEFAULT_ONE_SIDED_FACTOR,
            unbounded_factor: DEFAULT_UNBOUNDED_FACTOR,
        }
    }
}

impl PruneThresholds {
    /// Returns true if a key of this selectivity and body length survives.
    #[must_use]
    pub fn retains(&self, selectivity: KeySelectivity, len: usize, max_len: usize) -> bool {
        match selectivity {
            KeySelectivity::Bounded => true,
            KeySelectivity::OneSided => self.one_sided_factor * len > max_len,
            KeySelectivity::Unbounded => self.unbounded_factor * len > max_len,
        }
    }
}

/// Strategy applied to the decomposer's output before the host probes.
pub trait PruningStrategy: Send + Sync + fmt::Debug {
    /// Filters the keys of one query.
    ///
    /// Implementations must keep emission order and return a non-empty
    /// subset whenever `keys` is non-empty.
    fn prune(&self, keys: Vec<SearchKey>) -> Vec<SearchKey>;

    /// Short name for logs and CLI output.
    fn name(&self) -> &'static str;
}

/// Keeps every key.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPruning;

impl PruningStrategy for NoPruning {
    fn prune(&self, keys: Vec<SearchKey>) -> Vec<SearchKey> {
        keys
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Drops keys whose body is short relative to the longest key of the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectivityPruner {
    thresholds: PruneThresholds,
}

impl SelectivityPruner {
    /// Creates a pruner with the given thresholds.
    #[must_use]
    pub fn new(thresholds: PruneThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> PruneThresholds {
        self.thresholds
    }
}

impl PruningStrategy for SelectivityPruner {
    fn prune(&self, keys: Vec<SearchKey>) -> Vec<SearchKey> {
        prune(keys, &self.thresholds)
    }

    fn name(&self) -> &'static str {
        "selectivity"
    }
}

/// Drops low-selectivity keys; lengths exclude the flag bytes.
///
/// Queries with at most one key are returned untouched.
///
/// # Panics
///
/// Panics if the thresholds drop every key.
#[must_use]
pub fn prune(keys: Vec<SearchKey>, thresholds: &PruneThresholds) -> Vec<SearchKey> {
    if keys.len() <= 1 {
        return keys;
    }

    let max_len = keys.iter().map(|k| k.key.body().len()).max().unwrap_or(0);
    let before = keys.len();

    let kept: Vec<SearchKey> = keys
        .into_iter()
        .filter(|k| thresholds.retains(KeySelectivity::classify(k), k.key.body().len(), max_len))
        .collect();

    assert!(
        !kept.is_empty(),
        "pruning dropped all {before} search keys (max_len {max_len}, {thresholds:?})"
    );

    if kept.len() < before {
        tracing::debug!(
            dropped = before - kept.len(),
            kept = kept.len(),
            max_len,
            "pruned low-selectivity search keys"
        );
    }

    kept
}
