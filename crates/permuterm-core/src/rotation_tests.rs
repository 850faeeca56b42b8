//! Tests for `rotation` module

use super::key::{Key, SENTINEL};
use super::pattern::decompose;
use super::rotation::*;

#[test]
fn test_hello_rotations() {
    let keys = extract_stored_keys("hello");

    let expected: Vec<Key> = [
        &b"hello\0"[..],
        b"ello\0h",
        b"llo\0he",
        b"lo\0hel",
        b"o\0hell",
    ]
    .iter()
    .map(|body| Key::Rotation(body.to_vec()))
    .collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_permute_renders_marker() {
    assert_eq!(
        permute("hello"),
        vec!["hello$", "ello$h", "llo$he", "lo$hel", "o$hell"]
    );
}

#[test]
fn test_empty_word_is_single_marker() {
    assert_eq!(extract_stored_keys(""), vec![Key::EmptyMarker]);
    assert_eq!(permute(""), vec!["$"]);
}

#[test]
fn test_single_char_word() {
    assert_eq!(extract_stored_keys("x"), vec![Key::Rotation(b"x\0".to_vec())]);
}

#[test]
fn test_rotations_follow_codepoints() {
    // 4 chars, 5 bytes
    let keys = extract_stored_keys("café");

    assert_eq!(keys.len(), 4);
    assert_eq!(
        permute("café"),
        vec!["café$", "afé$c", "fé$ca", "é$caf"]
    );
}

#[test]
fn test_rotation_keys_never_start_with_sentinel() {
    for word in ["a", "ab", "hello", "日本語", "aaaa"] {
        for key in extract_stored_keys(word) {
            assert_ne!(key.body()[0], SENTINEL, "{word}: {key}");
            assert!(!key.is_flagged());
        }
    }
}

#[test]
fn test_repeated_chars_still_distinct_keys() {
    let keys = extract_stored_keys("aaa");
    let mut bodies: Vec<_> = keys.iter().map(|k| k.body().to_vec()).collect();
    bodies.sort();
    bodies.dedup();
    assert_eq!(bodies.len(), 3);
}

#[test]
fn test_offset_zero_equals_exact_search_key() {
    for word in ["hello", "x", "naïve", "a b"] {
        let stored = extract_stored_keys(word);
        let query = decompose(word);

        assert_eq!(query.len(), 1);
        assert_eq!(query.as_slice()[0].key, stored[0], "{word}");
        assert!(!query.as_slice()[0].partial_match);
    }
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: one key per character (one for the empty word).
        #[test]
        fn prop_key_count_matches_char_count(word in "\\PC{0,12}") {
            prop_assume!(!word.contains('\0'));
            let keys = extract_stored_keys(&word);
            prop_assert_eq!(keys.len(), word.chars().count().max(1));
        }

        /// Property: every cyclic rotation of the characters is present.
        #[test]
        fn prop_every_rotation_present(word in "[a-z\u{e9}\u{65e5}]{1,10}") {
            let chars: Vec<char> = word.chars().collect();
            let rendered = permute(&word);

            for i in 0..chars.len() {
                let suffix: String = chars[i..].iter().collect();
                let prefix: String = chars[..i].iter().collect();
                let expected = format!("{suffix}${prefix}");
                prop_assert_eq!(&rendered[i], &expected);
            }
        }

        /// Property: each key has exactly one sentinel, at a distinct position.
        #[test]
        fn prop_sentinel_positions_distinct(word in "[a-z]{1,16}") {
            let positions: Vec<usize> = extract_stored_keys(&word)
                .iter()
                .map(|k| {
                    let body = k.body();
                    prop_assert_eq!(body.iter().filter(|&&b| b == SENTINEL).count(), 1);
                    Ok(body.iter().position(|&b| b == SENTINEL).unwrap_or(usize::MAX))
                })
                .collect::<Result<_, TestCaseError>>()?;

            let mut unique = positions.clone();
            unique.sort_unstable();
            unique.dedup();
            prop_assert_eq!(unique.len(), positions.len());
        }
    }
}
