//! Reference host index for permuterm keys.
//!
//! The key algorithms in this crate are host-agnostic. This module wires them
//! into a small in-memory inverted index so they can be exercised end to end:
//!
//! - Insert: every rotation key of the word → posting list of doc IDs
//! - Query: scan each search key's range with the partial-match comparator,
//!   then AND the per-key hits per candidate
//! - Result: candidate doc IDs, to be rechecked against the original text

mod concurrent;
mod permuterm;
pub mod posting_list;

pub use concurrent::ConcurrentPermutermIndex;
pub use permuterm::{PermutermIndex, PermutermStats};
pub use posting_list::PostingList;
