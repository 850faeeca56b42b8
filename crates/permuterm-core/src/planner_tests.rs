//! Tests for `planner` module

use super::config::PermutermConfig;
use super::key::{Key, SearchKey};
use super::planner::*;
use super::prune::{NoPruning, PruneThresholds, SelectivityPruner};

#[test]
fn test_default_planner_does_not_prune() {
    let planner = QueryPlanner::default();
    assert_eq!(planner.strategy_name(), "none");
    assert_eq!(planner.extract_query_keys("%ab%cdefgh%").len(), 2);
}

#[test]
fn test_from_config_respects_enabled() {
    let mut config = PermutermConfig::default();
    assert_eq!(QueryPlanner::from_config(&config).strategy_name(), "none");

    config.pruning.enabled = true;
    assert_eq!(QueryPlanner::from_config(&config).strategy_name(), "selectivity");
}

#[test]
fn test_selectivity_planner_prunes() {
    let planner = QueryPlanner::with_strategy(SelectivityPruner::new(PruneThresholds::default()));
    let query = planner.extract_query_keys("%ab%cdefgh%");

    assert_eq!(
        query.into_inner(),
        vec![SearchKey::partial(Key::Literal(b"cdefgh".to_vec()))]
    );
}

#[test]
fn test_custom_factors_from_config() {
    let mut config = PermutermConfig::default();
    config.pruning.enabled = true;
    config.pruning.unbounded_factor = 4;

    // 4 * 2 > 6: the short run survives with the looser factor.
    let query = QueryPlanner::from_config(&config).extract_query_keys("%ab%cdefgh%");
    assert_eq!(query.len(), 2);
}

#[test]
fn test_empty_pattern_single_exact_key() {
    let planner = QueryPlanner::with_strategy(NoPruning);
    let query = planner.extract_query_keys("");

    assert_eq!(query.len(), 1);
    assert_eq!(query.as_slice()[0], SearchKey::exact(Key::EmptyMarker));
}
