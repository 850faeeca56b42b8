//! # `permuterm` Core
//!
//! Rotation-based (permuterm) substring index keys for `LIKE` wildcard queries.
//!
//! Every stored word is indexed under all of its cyclic rotations, with a
//! sentinel byte marking the cut point. A wildcard pattern is decomposed into a
//! few search keys that the host probes as prefix ranges; the per-key hits are
//! AND-combined into a candidate set that is a superset of the true matches.
//!
//! ## Features
//!
//! - **Rotation encoder**: `hello` → `hello$`, `ello$h`, `llo$he`, `lo$hel`, `o$hell`
//! - **Pattern decomposer**: minimal search keys with BEGIN/MIDDLE/END constraints
//! - **Key comparator**: ordering plus MATCH / skip-and-continue / stop scan control
//! - **Consistency evaluator**: per-query AND over the host's check vector
//! - **Key pruner**: optional selectivity filter, configured at runtime
//!
//! ## Quick Start
//!
//! ```rust
//! use permuterm_core::{PermutermIndex, QueryPlanner};
//!
//! let mut index = PermutermIndex::new();
//! index.insert(1, "hello")?;
//! index.insert(2, "yellow")?;
//! index.insert(3, "help")?;
//!
//! let planner = QueryPlanner::new();
//! let candidates = index.search_like("%llo%", &planner)?;
//! assert!(candidates.contains(1) && candidates.contains(2));
//! assert!(!candidates.contains(3));
//! # Ok::<(), permuterm_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// RoaringBitmap stores u32 document IDs; u64 IDs are range-checked on insert.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod compare;
pub mod config;
pub mod consistency;
pub mod error;
pub mod index;
pub mod key;
#[cfg(test)]
mod key_tests;
pub mod pattern;
pub mod planner;
#[cfg(test)]
mod planner_tests;
pub mod prune;
#[cfg(test)]
mod prune_tests;
pub mod rotation;
#[cfg(test)]
mod rotation_tests;

pub use compare::{actual_position, compare_encoded, compare_keys, KeyMatch};
pub use config::{ConfigError, LoggingConfig, PermutermConfig, PruningConfig};
pub use consistency::{is_consistent, ConsistencyContext};
pub use error::{Error, Result};
pub use index::{ConcurrentPermutermIndex, PermutermIndex, PermutermStats};
pub use key::{Key, PositionFlags, QueryKeys, SearchKey, SENTINEL, SENTINEL_DISPLAY};
pub use pattern::{decompose, segment, PatternShape, Segment};
pub use planner::QueryPlanner;
pub use prune::{
    prune, KeySelectivity, NoPruning, PruneThresholds, PruningStrategy, SelectivityPruner,
};
pub use rotation::{extract_stored_keys, permute};

/// Search keys for a LIKE pattern, without pruning.
///
/// Use [`QueryPlanner::extract_query_keys`] to apply a pruning strategy.
#[must_use]
pub fn extract_query_keys(pattern: &str) -> QueryKeys {
    decompose(pattern)
}
