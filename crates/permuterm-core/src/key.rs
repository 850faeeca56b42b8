//! Index key model shared by stored (rotation) keys and search keys.
//!
//! On the wire every key is a byte string. A single reserved byte, the
//! [`SENTINEL`], marks the rotation cut point inside a key. A key of three or
//! more bytes that starts with the sentinel carries a positional flag byte
//! instead of rotated content:
//!
//! | Variant        | Wire form                          |
//! |----------------|------------------------------------|
//! | `EmptyMarker`  | `$`                                |
//! | `Rotation`     | `suffix $ prefix` (never starts with `$`) |
//! | `Literal`      | `literal` (no `$`, may be empty)   |
//! | `Flagged`      | `$ flag literal`                   |
//!
//! (`$` stands for the sentinel byte.)
//!
//! In memory the variants are kept apart by [`Key`] so that no code path has to
//! guess the meaning of a leading sentinel from byte counts.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::error::{Error, Result};

/// Reserved byte marking the rotation point (and flagged keys when leading).
///
/// UTF-8 text handed to the index must never contain it.
pub const SENTINEL: u8 = 0x00;

/// Printable stand-in for [`SENTINEL`] used by debug renderers.
pub const SENTINEL_DISPLAY: char = '$';

const EMPTY_MARKER_BODY: &[u8] = &[SENTINEL];

/// Bitmask constraining where a literal run sits inside the original word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionFlags(u8);

impl PositionFlags {
    /// No positional constraint.
    pub const NONE: Self = Self(0);
    /// The run must start the word.
    pub const BEGIN: Self = Self(0x01);
    /// The run may float anywhere strictly inside the word.
    pub const MIDDLE: Self = Self(0x02);
    /// The run must end the word.
    pub const END: Self = Self(0x04);

    const KNOWN_BITS: u8 = 0x07;

    /// Raw flag byte as written after the sentinel.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Parses a flag byte, rejecting unknown bits.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::KNOWN_BITS == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Returns true if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if `self` and `other` share at least one flag.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for PositionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PositionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PositionFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for PositionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let names = [
            (Self::BEGIN, "BEGIN"),
            (Self::MIDDLE, "MIDDLE"),
            (Self::END, "END"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// An index key, either stored by the host or produced for a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Encoding of the empty word (and of the empty pattern).
    EmptyMarker,
    /// `suffix ++ SENTINEL ++ prefix`; the first byte is never the sentinel.
    Rotation(Vec<u8>),
    /// Plain literal without any sentinel. Search side only.
    Literal(Vec<u8>),
    /// Literal run constrained to a rotation position. Search side only.
    Flagged {
        /// Allowed positions of the literal inside the word.
        flags: PositionFlags,
        /// Non-empty literal run.
        literal: Vec<u8>,
    },
}

impl Key {
    /// Builds `head ++ SENTINEL ++ tail`.
    #[must_use]
    pub fn rotation(head: &[u8], tail: &[u8]) -> Self {
        let mut body = Vec::with_capacity(head.len() + 1 + tail.len());
        body.extend_from_slice(head);
        body.push(SENTINEL);
        body.extend_from_slice(tail);
        Self::Rotation(body)
    }

    /// Builds a flagged key for a literal run.
    #[must_use]
    pub fn flagged(flags: PositionFlags, literal: &[u8]) -> Self {
        Self::Flagged {
            flags,
            literal: literal.to_vec(),
        }
    }

    /// Comparable content of the key, flag byte stripped.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        match self {
            Self::EmptyMarker => EMPTY_MARKER_BODY,
            Self::Rotation(body) | Self::Literal(body) => body,
            Self::Flagged { literal, .. } => literal,
        }
    }

    /// Positional flags carried by the key (`NONE` unless flagged).
    #[must_use]
    pub fn flags(&self) -> PositionFlags {
        match self {
            Self::Flagged { flags, .. } => *flags,
            _ => PositionFlags::NONE,
        }
    }

    /// Returns true for [`Key::Flagged`].
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::Flagged { .. })
    }

    /// Length of [`Key::encode`]'s output without allocating it.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Flagged { literal, .. } => 2 + literal.len(),
            other => other.body().len(),
        }
    }

    /// Serializes the key to its wire form.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Flagged { flags, literal } => {
                let mut out = Vec::with_capacity(2 + literal.len());
                out.push(SENTINEL);
                out.push(flags.bits());
                out.extend_from_slice(literal);
                out
            }
            other => other.body().to_vec(),
        }
    }

    /// Parses a key from its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedKey`] when a leading sentinel is followed by a
    /// flag byte but no literal, or when the flag byte is zero or has unknown
    /// bits.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [] => Ok(Self::Literal(Vec::new())),
            [SENTINEL] => Ok(Self::EmptyMarker),
            [SENTINEL, _] => Err(Error::MalformedKey(
                "flag byte without literal run".to_string(),
            )),
            [SENTINEL, flag, literal @ ..] => {
                let flags = PositionFlags::from_bits(*flag)
                    .filter(|flags| !flags.is_empty())
                    .ok_or_else(|| Error::MalformedKey(format!("invalid flag byte {flag:#04x}")))?;
                Ok(Self::Flagged {
                    flags,
                    literal: literal.to_vec(),
                })
            }
            body if body.contains(&SENTINEL) => Ok(Self::Rotation(body.to_vec())),
            body => Ok(Self::Literal(body.to_vec())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Flagged { flags, .. } = self {
            write!(f, "{SENTINEL_DISPLAY}[{flags}]")?;
        }
        f.write_str(&render_sentinel(self.body()))
    }
}

/// Renders key bytes with every sentinel replaced by [`SENTINEL_DISPLAY`].
#[must_use]
pub fn render_sentinel(bytes: &[u8]) -> String {
    let mut marker = [0u8; 4];
    let marker = SENTINEL_DISPLAY.encode_utf8(&mut marker);
    bytes
        .split(|&b| b == SENTINEL)
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(&*marker)
}

/// A search key together with its comparison mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    /// The key probed against the index.
    pub key: Key,
    /// Prefix-constraint mode (true) or full equality (false).
    pub partial_match: bool,
}

impl SearchKey {
    /// Key requiring full equality.
    #[must_use]
    pub fn exact(key: Key) -> Self {
        Self {
            key,
            partial_match: false,
        }
    }

    /// Key matched as a prefix constraint.
    #[must_use]
    pub fn partial(key: Key) -> Self {
        Self {
            key,
            partial_match: true,
        }
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.partial_match { "partial" } else { "exact" };
        write!(f, "{} ({mode})", self.key)
    }
}

/// Ordered search keys for one query.
///
/// The order is significant: the host's check vector is parallel to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryKeys {
    keys: Vec<SearchKey>,
}

impl QueryKeys {
    /// Number of search keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over the keys in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, SearchKey> {
        self.keys.iter()
    }

    /// Search keys as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SearchKey] {
        &self.keys
    }

    /// Wire-encoded keys, parallel to [`QueryKeys::partial_match_flags`].
    #[must_use]
    pub fn encoded(&self) -> Vec<Vec<u8>> {
        self.keys.iter().map(|k| k.key.encode()).collect()
    }

    /// Partial-match booleans, parallel to [`QueryKeys::encoded`].
    #[must_use]
    pub fn partial_match_flags(&self) -> Vec<bool> {
        self.keys.iter().map(|k| k.partial_match).collect()
    }

    /// Consumes the wrapper.
    #[must_use]
    pub fn into_inner(self) -> Vec<SearchKey> {
        self.keys
    }
}

impl From<Vec<SearchKey>> for QueryKeys {
    fn from(keys: Vec<SearchKey>) -> Self {
        Self { keys }
    }
}

impl IntoIterator for QueryKeys {
    type Item = SearchKey;
    type IntoIter = std::vec::IntoIter<SearchKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryKeys {
    type Item = &'a SearchKey;
    type IntoIter = std::slice::Iter<'a, SearchKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
