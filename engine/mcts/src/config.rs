//! MCTS configuration parameters.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use league_config::SearchConfig as SearchSettings;
use league_core::TurnOrder;

use crate::search::SearchError;

/// Which freshly materialized child the expansion phase descends into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionPolicy {
    /// First child in enumeration order. Seed-free.
    #[default]
    First,
    /// Uniformly random child drawn from the search RNG.
    Random,
}

impl FromStr for ExpansionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown expansion policy '{other}'")),
        }
    }
}

impl fmt::Display for ExpansionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Random => f.write_str("random"),
        }
    }
}

/// Configuration for one trade search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Select/expand/simulate/backpropagate iterations per search.
    pub iterations: u32,

    /// UCT exploration constant `c`. Zero turns selection into pure
    /// exploitation.
    pub exploration: f64,

    /// Added to visit counts so unvisited children score finitely.
    pub epsilon: f64,

    /// Trades a rollout may apply beyond the expanded node.
    pub rollout_depth: u32,

    /// Trades a path from the root may contain. Nodes at this depth are
    /// terminal.
    pub max_trade_depth: u32,

    pub turn_order: TurnOrder,

    pub expansion: ExpansionPolicy,

    /// Seed for the ChaCha20 RNG behind random expansion and rollouts.
    pub seed: u64,

    /// Wall-clock budget, checked once per iteration.
    pub deadline: Option<Duration>,

    /// Independent root-parallel trees. 1 searches on the calling thread.
    pub threads: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: 1.41,
            epsilon: 1e-6,
            rollout_depth: 8,
            max_trade_depth: 3,
            turn_order: TurnOrder::FocalOnly,
            expansion: ExpansionPolicy::First,
            seed: 42,
            deadline: None,
            threads: 1,
        }
    }
}

impl MctsConfig {
    /// Build from the `[search]` section of the central config.
    pub fn from_config(settings: &SearchSettings) -> Result<Self, SearchError> {
        let config = Self {
            iterations: settings.iterations,
            exploration: settings.exploration,
            epsilon: settings.epsilon,
            rollout_depth: settings.rollout_depth,
            max_trade_depth: settings.max_trade_depth,
            turn_order: settings
                .turn_order
                .parse()
                .map_err(SearchError::InvalidConfig)?,
            expansion: settings
                .expansion
                .parse()
                .map_err(SearchError::InvalidConfig)?,
            seed: settings.seed,
            deadline: (settings.deadline_ms > 0).then(|| Duration::from_millis(settings.deadline_ms)),
            threads: settings.threads,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 50,
            rollout_depth: 4,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if self.threads == 0 {
            return Err(SearchError::InvalidConfig("threads must be at least 1".into()));
        }
        Ok(())
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    pub fn with_max_trade_depth(mut self, depth: u32) -> Self {
        self.max_trade_depth = depth;
        self
    }

    pub fn with_turn_order(mut self, order: TurnOrder) -> Self {
        self.turn_order = order;
        self
    }

    pub fn with_expansion(mut self, expansion: ExpansionPolicy) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}
