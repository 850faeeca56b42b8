//! Tests for `prune` module

use super::key::{Key, PositionFlags, SearchKey};
use super::pattern::decompose;
use super::prune::*;

fn partial_flagged(flags: PositionFlags, literal: &str) -> SearchKey {
    SearchKey::partial(Key::flagged(flags, literal.as_bytes()))
}

// ========== Selectivity Tests ==========

#[test]
fn test_classify_flagged_keys() {
    let cases = [
        (PositionFlags::BEGIN | PositionFlags::END, KeySelectivity::Bounded),
        (PositionFlags::BEGIN, KeySelectivity::OneSided),
        (PositionFlags::END, KeySelectivity::OneSided),
        (PositionFlags::MIDDLE, KeySelectivity::Unbounded),
        (PositionFlags::MIDDLE | PositionFlags::BEGIN, KeySelectivity::Unbounded),
        (PositionFlags::MIDDLE | PositionFlags::END, KeySelectivity::Unbounded),
    ];
    for (flags, expected) in cases {
        assert_eq!(
            KeySelectivity::classify(&partial_flagged(flags, "ab")),
            expected,
            "{flags}"
        );
    }
}

#[test]
fn test_classify_unflagged_keys() {
    let both_ends = SearchKey::partial(Key::rotation(b"lo", b"he"));
    let suffix = SearchKey::partial(Key::rotation(b"lo", b""));
    let exact = SearchKey::exact(Key::rotation(b"lo", b""));
    let literal = SearchKey::partial(Key::Literal(b"lo".to_vec()));

    assert_eq!(KeySelectivity::classify(&both_ends), KeySelectivity::Bounded);
    assert_eq!(KeySelectivity::classify(&suffix), KeySelectivity::OneSided);
    assert_eq!(KeySelectivity::classify(&exact), KeySelectivity::Bounded);
    assert_eq!(KeySelectivity::classify(&literal), KeySelectivity::Unbounded);
    assert_eq!(
        KeySelectivity::classify(&SearchKey::exact(Key::EmptyMarker)),
        KeySelectivity::Bounded
    );
}

#[test]
fn test_thresholds_default() {
    let thresholds = PruneThresholds::default();
    assert_eq!(thresholds.one_sided_factor, 3);
    assert_eq!(thresholds.unbounded_factor, 2);
}

#[test]
fn test_thresholds_retains() {
    let t = PruneThresholds::default();

    assert!(t.retains(KeySelectivity::Bounded, 1, 100));
    assert!(t.retains(KeySelectivity::OneSided, 4, 11));
    assert!(!t.retains(KeySelectivity::OneSided, 3, 9));
    assert!(t.retains(KeySelectivity::Unbounded, 5, 9));
    assert!(!t.retains(KeySelectivity::Unbounded, 4, 8));
}

// ========== prune() Tests ==========

#[test]
fn test_single_key_untouched() {
    let keys = decompose("%a%").into_inner();
    assert_eq!(prune(keys.clone(), &PruneThresholds::default()), keys);
}

#[test]
fn test_short_floating_key_dropped() {
    let keys = vec![
        SearchKey::partial(Key::Literal(b"abcdefgh".to_vec())),
        SearchKey::partial(Key::Literal(b"xy".to_vec())),
    ];

    let kept = prune(keys, &PruneThresholds::default());

    assert_eq!(kept, vec![SearchKey::partial(Key::Literal(b"abcdefgh".to_vec()))]);
}

#[test]
fn test_bounded_key_always_kept() {
    // "a%bcdefghij%k": rotation "k$a" is short but anchored at both ends.
    let keys = decompose("a%bcdefghij%k").into_inner();
    let kept = prune(keys, &PruneThresholds::default());

    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].key, Key::rotation(b"k", b"a"));
}

#[test]
fn test_order_preserved() {
    let keys = vec![
        partial_flagged(PositionFlags::MIDDLE, "abcd"),
        partial_flagged(PositionFlags::MIDDLE, "z"),
        partial_flagged(PositionFlags::MIDDLE, "efgh"),
    ];

    let kept = prune(keys, &PruneThresholds::default());

    let bodies: Vec<&[u8]> = kept.iter().map(|k| k.key.body()).collect();
    assert_eq!(bodies, vec![&b"abcd"[..], b"efgh"]);
}

#[test]
fn test_strategies() {
    let keys = vec![
        SearchKey::partial(Key::Literal(b"abcdefgh".to_vec())),
        SearchKey::partial(Key::Literal(b"x".to_vec())),
    ];

    assert_eq!(NoPruning.prune(keys.clone()).len(), 2);
    assert_eq!(NoPruning.name(), "none");

    let pruner = SelectivityPruner::new(PruneThresholds::default());
    assert_eq!(pruner.prune(keys).len(), 1);
    assert_eq!(pruner.name(), "selectivity");
    assert_eq!(pruner.thresholds(), PruneThresholds::default());
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Property: never empty, and only sub-threshold keys are dropped.
        #[test]
        fn prop_prune_keeps_ordered_nonempty_subset(
            pattern in "[abc%_]{0,20}",
            one_sided in 2usize..6,
            unbounded in 2usize..6,
        ) {
            let thresholds = PruneThresholds { one_sided_factor: one_sided, unbounded_factor: unbounded };
            let keys = decompose(&pattern).into_inner();
            let max_len = keys.iter().map(|k| k.key.body().len()).max().unwrap_or(0);
            let kept = prune(keys.clone(), &thresholds);

            prop_assert!(!kept.is_empty());

            let mut rest = kept.iter().peekable();
            for key in &keys {
                if rest.peek() == Some(&key) {
                    rest.next();
                } else {
                    let sel = KeySelectivity::classify(key);
                    prop_assert!(!thresholds.retains(sel, key.key.body().len(), max_len));
                }
            }
            prop_assert!(rest.next().is_none());
        }
    }
}
