//! Query planner: pattern decomposition followed by the configured pruning.

use crate::config::PermutermConfig;
use crate::key::QueryKeys;
use crate::pattern::decompose;
use crate::prune::{NoPruning, PruningStrategy, SelectivityPruner};

/// Produces the search keys for LIKE patterns.
///
/// Stateless apart from its pruning strategy; share it freely across threads.
#[derive(Debug)]
pub struct QueryPlanner {
    strategy: Box<dyn PruningStrategy>,
}

impl Default for QueryPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryPlanner {
    /// Planner without pruning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(NoPruning)
    }

    /// Planner with a custom pruning strategy.
    #[must_use]
    pub fn with_strategy(strategy: impl PruningStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    /// Planner following the `[pruning]` section of a configuration.
    #[must_use]
    pub fn from_config(config: &PermutermConfig) -> Self {
        if config.pruning.enabled {
            Self::with_strategy(SelectivityPruner::new(config.pruning.thresholds()))
        } else {
            Self::new()
        }
    }

    /// Name of the active pruning strategy.
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Search keys for `pattern`, in the order the host must keep.
    #[must_use]
    pub fn extract_query_keys(&self, pattern: &str) -> QueryKeys {
        let keys = decompose(pattern);
        let before = keys.len();
        let keys = QueryKeys::from(self.strategy.prune(keys.into_inner()));

        assert!(
            before == 0 || !keys.is_empty(),
            "pruning strategy '{}' returned no keys",
            self.strategy.name()
        );

        keys
    }
}
