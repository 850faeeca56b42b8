//! Key comparator: index ordering and partial-match scan control.
//!
//! In exact mode the comparator is an ordinary ordering of the search key
//! relative to the index key. In partial mode the host walks index keys in
//! ascending order starting at the search key and needs three outcomes:
//!
//! - [`KeyMatch::Match`]: the index key satisfies the search key;
//! - [`KeyMatch::Less`]: textual prefix matched at a rotation position the
//!   search key forbids; skip the key but keep scanning;
//! - [`KeyMatch::Greater`]: the prefix diverged; no later key can match.

use std::cmp::Ordering;

use crate::error::Result;
use crate::key::{Key, PositionFlags, SENTINEL};

/// Tri-state comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMatch {
    /// Keys are equal (exact mode) or the index key matches (partial mode).
    Match,
    /// Search sorts before index (exact mode); skip and continue (partial mode).
    Less,
    /// Search sorts after index (exact mode); stop scanning (partial mode).
    Greater,
}

impl KeyMatch {
    /// Returns true for [`KeyMatch::Match`].
    #[must_use]
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }

    /// In partial mode: true when the forward scan must stop.
    #[must_use]
    pub const fn should_stop(self) -> bool {
        matches!(self, Self::Greater)
    }

    /// Ordering of the search key relative to the index key.
    #[must_use]
    pub const fn to_ordering(self) -> Ordering {
        match self {
            Self::Match => Ordering::Equal,
            Self::Less => Ordering::Less,
            Self::Greater => Ordering::Greater,
        }
    }

    /// Integer form expected by C-style index hosts (`-1`, `0`, `1`).
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Match => 0,
            Self::Less => -1,
            Self::Greater => 1,
        }
    }
}

impl From<Ordering> for KeyMatch {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Less,
            Ordering::Equal => Self::Match,
            Ordering::Greater => Self::Greater,
        }
    }
}

/// Compares an index key against a search key.
///
/// # Panics
///
/// Panics if `partial_match` is set and `index` is flagged: stored keys are
/// plain rotations, so a flagged key on the index side means the caller
/// mixed up the arguments or the index holds foreign content.
#[must_use]
pub fn compare_keys(index: &Key, search: &Key, partial_match: bool) -> KeyMatch {
    let search_flags = search.flags();

    if index.is_flagged() {
        assert!(
            !partial_match,
            "flagged index key {index} cannot be scanned in partial-match mode"
        );
        if search.is_flagged() && index.flags() != search_flags {
            // Only reachable from equality probes between two search keys.
            return KeyMatch::Greater;
        }
    }

    let search_body = search.body();
    let index_body = index.body();

    if search_body.is_empty() {
        return if partial_match || index_body.is_empty() {
            KeyMatch::Match
        } else {
            KeyMatch::Less
        };
    }

    let common = search_body.len().min(index_body.len());
    let prefix = search_body[..common].cmp(&index_body[..common]);

    if !partial_match {
        return prefix
            .then_with(|| search_body.len().cmp(&index_body.len()))
            .into();
    }

    match prefix {
        Ordering::Equal if search_body.len() > index_body.len() => KeyMatch::Greater,
        Ordering::Equal if !search_flags.is_empty() && index_body.len() > search_body.len() => {
            let actual = actual_position(index_body, search_body.len());
            if search_flags.intersects(actual) {
                KeyMatch::Match
            } else {
                tracing::trace!(
                    expected = %search_flags,
                    actual = %actual,
                    "prefix matched at forbidden position"
                );
                KeyMatch::Less
            }
        }
        Ordering::Equal => KeyMatch::Match,
        Ordering::Less | Ordering::Greater => KeyMatch::Greater,
    }
}

/// Where a prefix of `prefix_len` bytes sits inside the word a rotation key
/// was built from.
///
/// - `BEGIN`: the key is the offset-0 rotation (sentinel is its last byte);
/// - `END`: the sentinel directly follows the prefix;
/// - `MIDDLE`: anything else.
#[must_use]
pub fn actual_position(index_body: &[u8], prefix_len: usize) -> PositionFlags {
    if index_body.last() == Some(&SENTINEL) {
        PositionFlags::BEGIN
    } else if index_body.get(prefix_len) == Some(&SENTINEL) {
        PositionFlags::END
    } else {
        PositionFlags::MIDDLE
    }
}

/// Byte-level entry point: decodes both keys, then compares them.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedKey`] if either side fails to decode.
pub fn compare_encoded(index: &[u8], search: &[u8], partial_match: bool) -> Result<KeyMatch> {
    let index = Key::decode(index)?;
    let search = Key::decode(search)?;
    Ok(compare_keys(&index, &search, partial_match))
}
