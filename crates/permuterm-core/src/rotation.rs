//! Rotation encoder: turns one stored word into its permuterm keys.
//!
//! Every codepoint boundary of the word becomes a cut point:
//! `hello` is stored as `hello$`, `ello$h`, `llo$he`, `lo$hel`, `o$hell`.
//! A suffix/infix query on the word then turns into a prefix query against
//! one of the rotations.

use crate::key::{render_sentinel, Key, SENTINEL};

/// Encodes a stored word into `max(1, char_count)` rotation keys.
///
/// Offsets advance by codepoint, never by raw byte. The empty word encodes
/// to the single [`Key::EmptyMarker`]. No key produced here carries a flag.
///
/// # Example
///
/// ```
/// use permuterm_core::{extract_stored_keys, Key};
///
/// let keys = extract_stored_keys("ab");
/// assert_eq!(keys, vec![Key::Rotation(b"ab\0".to_vec()), Key::Rotation(b"b\0a".to_vec())]);
/// ```
#[must_use]
pub fn extract_stored_keys(word: &str) -> Vec<Key> {
    debug_assert!(
        !word.as_bytes().contains(&SENTINEL),
        "stored word must not contain the sentinel byte"
    );

    if word.is_empty() {
        return vec![Key::EmptyMarker];
    }

    let bytes = word.as_bytes();
    word.char_indices()
        .map(|(offset, _)| Key::rotation(&bytes[offset..], &bytes[..offset]))
        .collect()
}

/// Renders every rotation of `word` with the sentinel shown as `$`.
///
/// Debug helper only; not used on any query path.
#[must_use]
pub fn permute(word: &str) -> Vec<String> {
    extract_stored_keys(word)
        .iter()
        .map(|key| render_sentinel(key.body()))
        .collect()
}
