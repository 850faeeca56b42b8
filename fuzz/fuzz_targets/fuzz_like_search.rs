//! Fuzz target for pattern decomposition and LIKE search.
//!
//! Any UTF-8 pattern must decompose into a non-empty key list, and searching
//! an index must return every document whose word contains the pattern's
//! literal runs in the required positions. The cheap check here: a word equal
//! to the pattern with wildcards removed always matches when the pattern has
//! no `_`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use permuterm_core::{decompose, PermutermIndex, QueryPlanner, SENTINEL};

#[derive(Debug, Arbitrary)]
struct Input {
    pattern: String,
    words: Vec<String>,
    prune: bool,
}

fuzz_target!(|input: Input| {
    let query = decompose(&input.pattern);
    assert!(!query.is_empty());

    let mut config = permuterm_core::PermutermConfig::default();
    config.pruning.enabled = input.prune;
    let planner = QueryPlanner::from_config(&config);

    let mut index = PermutermIndex::new();
    let mut next_id = 0u64;
    for word in input.words.iter().take(64) {
        if word.bytes().any(|b| b == SENTINEL) {
            assert!(index.insert(next_id, word).is_err());
            continue;
        }
        index.insert(next_id, word).expect("valid word");
        next_id += 1;
    }

    let collapsed: String = input.pattern.chars().filter(|&c| c != '%').collect();
    let has_sentinel = input.pattern.bytes().any(|b| b == SENTINEL);
    if !collapsed.contains('_') && !has_sentinel {
        index.insert(next_id, &collapsed).expect("valid word");
        let found = index
            .search_like(&input.pattern, &planner)
            .expect("stored keys decode");
        assert!(found.contains(next_id as u32), "{:?} missed {:?}", input.pattern, collapsed);
    } else {
        let _ = index.search_like(&input.pattern, &planner);
    }
});
