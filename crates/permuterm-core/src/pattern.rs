//! Pattern decomposer: turns a LIKE pattern into permuterm search keys.
//!
//! # Algorithm
//!
//! 1. Split the pattern into literal runs and wildcard gaps. `_` and `%` are
//!    not distinguished here; any run of them collapses into one gap.
//! 2. Classify the segment list by whether it starts/ends with a gap.
//! 3. Emit the keys for that shape (`$` = sentinel, `L0..Lk` = literal runs):
//!
//! | Shape                | Keys                                                    |
//! |----------------------|---------------------------------------------------------|
//! | `X`                  | `X$` (exact)                                            |
//! | `X % .. % Y`         | `Y$X`, interior runs `MIDDLE`                           |
//! | `X % .. %`           | `BEGIN X`, later runs `MIDDLE`, last run `MIDDLE\|END`  |
//! | `% .. % Y`           | `Y$`, first interior `MIDDLE\|BEGIN`, others `MIDDLE`   |
//! | `% X .. %`           | `""` for a lone gap; plain runs for 1-2 runs; else flags |
//!
//! All keys except the exact and empty-pattern ones are partial-match keys.
//! The key set is a superset filter: every word matching the pattern matches
//! every key, but not every word matching all keys matches the pattern.

use crate::key::{Key, PositionFlags, QueryKeys, SearchKey};

/// Single-character wildcard.
pub const WILDCARD_ONE: char = '_';
/// Multi-character wildcard.
pub const WILDCARD_ANY: char = '%';

/// Returns true for `_` and `%`.
#[must_use]
pub const fn is_wildcard(ch: char) -> bool {
    matches!(ch, WILDCARD_ONE | WILDCARD_ANY)
}

/// One item of a segmented pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// One or more consecutive wildcard characters.
    WildcardGap,
    /// Maximal run of non-wildcard characters.
    LiteralRun(&'a str),
}

impl<'a> Segment<'a> {
    /// The literal text, if this is a literal run.
    #[must_use]
    pub const fn literal(&self) -> Option<&'a str> {
        match *self {
            Self::WildcardGap => None,
            Self::LiteralRun(run) => Some(run),
        }
    }

    /// Returns true for a wildcard gap.
    #[must_use]
    pub const fn is_gap(&self) -> bool {
        matches!(self, Self::WildcardGap)
    }
}

/// Splits a pattern into alternating literal runs and wildcard gaps.
///
/// Scans by codepoint, so multibyte characters are never split.
#[must_use]
pub fn segment(pattern: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;

    for (pos, ch) in pattern.char_indices() {
        if is_wildcard(ch) {
            if let Some(start) = run_start.take() {
                segments.push(Segment::LiteralRun(&pattern[start..pos]));
            }
            if !matches!(segments.last(), Some(Segment::WildcardGap)) {
                segments.push(Segment::WildcardGap);
            }
        } else if run_start.is_none() {
            run_start = Some(pos);
        }
    }

    if let Some(start) = run_start {
        segments.push(Segment::LiteralRun(&pattern[start..]));
    }

    segments
}

/// Shape of a segmented pattern, deciding which keys are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternShape {
    /// The empty pattern.
    Empty,
    /// A single literal run without wildcards.
    Exact,
    /// Starts and ends with a literal run, at least one gap between.
    LiteralToLiteral,
    /// Starts with a literal run, ends with a gap.
    LiteralToWildcard,
    /// Starts with a gap, ends with a literal run.
    WildcardToLiteral,
    /// Starts and ends with a gap (a lone gap included).
    WildcardToWildcard,
}

impl PatternShape {
    /// Classifies a segment list.
    #[must_use]
    pub fn classify(segments: &[Segment<'_>]) -> Self {
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            return Self::Empty;
        };

        match (first.is_gap(), last.is_gap()) {
            (false, false) if segments.len() == 1 => Self::Exact,
            (false, false) => Self::LiteralToLiteral,
            (false, true) => Self::LiteralToWildcard,
            (true, false) => Self::WildcardToLiteral,
            (true, true) => Self::WildcardToWildcard,
        }
    }
}

/// Decomposes a LIKE pattern into its search keys, unpruned.
///
/// # Example
///
/// ```
/// use permuterm_core::{decompose, Key, PositionFlags};
///
/// let query = decompose("hel%");
/// assert_eq!(query.len(), 1);
/// assert_eq!(query.as_slice()[0].key, Key::flagged(PositionFlags::BEGIN, b"hel"));
/// assert!(query.as_slice()[0].partial_match);
/// ```
#[must_use]
pub fn decompose(pattern: &str) -> QueryKeys {
    let segments = segment(pattern);
    let shape = PatternShape::classify(&segments);
    let literals: Vec<&[u8]> = segments
        .iter()
        .filter_map(Segment::literal)
        .map(str::as_bytes)
        .collect();

    let keys = match (shape, literals.as_slice()) {
        (PatternShape::Empty, _) => vec![SearchKey::exact(Key::EmptyMarker)],
        (PatternShape::Exact, [run]) => vec![SearchKey::exact(Key::rotation(run, &[]))],
        (PatternShape::LiteralToLiteral, [first, interior @ .., last]) => {
            literal_to_literal(first, interior, last)
        }
        (PatternShape::LiteralToWildcard, [first, rest @ ..]) => literal_to_wildcard(first, rest),
        (PatternShape::WildcardToLiteral, [interior @ .., last]) => {
            wildcard_to_literal(interior, last)
        }
        (PatternShape::WildcardToWildcard, runs) => wildcard_to_wildcard(runs),
        (shape, runs) => unreachable!("{shape:?} pattern with {} literal runs", runs.len()),
    };

    debug_assert!(
        keys.iter()
            .all(|k| k.key.encoded_len() <= pattern.len() + 3),
        "search key longer than pattern bound"
    );

    tracing::trace!(
        ?shape,
        segments = segments.len(),
        keys = keys.len(),
        "decomposed LIKE pattern"
    );

    QueryKeys::from(keys)
}

/// `X % [X1 % ..] Y` => `Y$X` plus `MIDDLE X1 ..`.
fn literal_to_literal(first: &[u8], interior: &[&[u8]], last: &[u8]) -> Vec<SearchKey> {
    std::iter::once(SearchKey::partial(Key::rotation(last, first)))
        .chain(
            interior
                .iter()
                .map(|run| SearchKey::partial(Key::flagged(PositionFlags::MIDDLE, run))),
        )
        .collect()
}

/// `X % [X1 % ..]` => `BEGIN X` plus `MIDDLE X1 ..`, the last run also `END`.
fn literal_to_wildcard(first: &[u8], rest: &[&[u8]]) -> Vec<SearchKey> {
    let last_index = rest.len().saturating_sub(1);

    std::iter::once(SearchKey::partial(Key::flagged(PositionFlags::BEGIN, first)))
        .chain(rest.iter().enumerate().map(|(i, run)| {
            let flags = if i == last_index {
                PositionFlags::MIDDLE | PositionFlags::END
            } else {
                PositionFlags::MIDDLE
            };
            SearchKey::partial(Key::flagged(flags, run))
        }))
        .collect()
}

/// `% [X1 % ..] Y` => `Y$` plus `MIDDLE|BEGIN X1`, `MIDDLE ..`.
fn wildcard_to_literal(interior: &[&[u8]], last: &[u8]) -> Vec<SearchKey> {
    std::iter::once(SearchKey::partial(Key::rotation(last, &[])))
        .chain(interior.iter().enumerate().map(|(i, run)| {
            let flags = if i == 0 {
                PositionFlags::MIDDLE | PositionFlags::BEGIN
            } else {
                PositionFlags::MIDDLE
            };
            SearchKey::partial(Key::flagged(flags, run))
        }))
        .collect()
}

/// `% X [% X1 ..] %` => plain runs when at most two, flagged runs otherwise.
fn wildcard_to_wildcard(literals: &[&[u8]]) -> Vec<SearchKey> {
    if literals.is_empty() {
        // Lone gap: everything matches, full scan.
        return vec![SearchKey::partial(Key::Literal(Vec::new()))];
    }

    if literals.len() <= 2 {
        return literals
            .iter()
            .map(|run| SearchKey::partial(Key::Literal(run.to_vec())))
            .collect();
    }

    let last_index = literals.len() - 1;
    literals
        .iter()
        .enumerate()
        .map(|(i, run)| {
            let flags = if i == 0 {
                PositionFlags::MIDDLE | PositionFlags::BEGIN
            } else if i == last_index {
                PositionFlags::MIDDLE | PositionFlags::END
            } else {
                PositionFlags::MIDDLE
            };
            SearchKey::partial(Key::flagged(flags, run))
        })
        .collect()
}
