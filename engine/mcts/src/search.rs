//! MCTS search over trade sequences.
//!
//! Implements the core MCTS loop:
//! 1. Selection: descend expanded nodes by UCT until a leaf
//! 2. Expansion: materialize every admissible trade for the active team
//! 3. Simulation: roll out with the configured policy and score the focal team
//! 4. Backpropagation: add the reward and a visit to every node on the path

use std::time::Instant;

use league_core::{Agent, LeagueError, LeagueState, Negotiation, TeamId, TradeAction, Turn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::{ExpansionPolicy, MctsConfig};
use crate::node::NodeId;
use crate::parallel::search_root_parallel;
use crate::policy::{rollout, GreedyPolicy, RolloutPolicy};
use crate::tree::{MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No admissible trade found for {0}")]
    NoTradeFound(TeamId),

    #[error(transparent)]
    League(#[from] LeagueError),

    #[error("Invalid search config: {0}")]
    InvalidConfig(String),

    #[error("Search worker {0} panicked")]
    WorkerPanicked(usize),
}

/// Result of a trade search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub focal: TeamId,

    /// First trade of the most rewarding sequence found.
    pub action: TradeAction,

    /// Average rollout reward through `action`.
    pub expected_reward: f64,

    /// Focal utility before any trade.
    pub baseline: f64,

    /// Visits of the chosen child.
    pub visits: u32,

    /// Iterations actually run. Lower than requested when the deadline hit.
    pub iterations: u32,

    pub tree: TreeStats,
}

impl SearchResult {
    /// Expected utility gain over standing pat.
    pub fn improvement(&self) -> f64 {
        self.expected_reward - self.baseline
    }
}

/// Search state for one focal team.
pub struct TradeSearch<'a, P: RolloutPolicy + ?Sized = GreedyPolicy> {
    tree: MctsTree,
    negotiation: &'a Negotiation,
    focal: Agent,
    policy: &'a P,
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl<'a, P: RolloutPolicy + ?Sized> TradeSearch<'a, P> {
    /// Root a new tree at `state` with `focal` proposing first. Turn order
    /// and depth budget come from `config`.
    pub fn new(
        state: &LeagueState,
        focal: &TeamId,
        negotiation: &'a Negotiation,
        policy: &'a P,
        config: MctsConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        let root = state.with_turn(Turn::new(
            focal.clone(),
            config.turn_order,
            config.max_trade_depth,
        ))?;
        let focal = negotiation.agent(focal)?.clone();
        let rng = ChaCha20Rng::seed_from_u64(config.seed);

        Ok(Self {
            tree: MctsTree::new(root),
            negotiation,
            focal,
            policy,
            config,
            rng,
        })
    }

    /// Run up to `iterations` iterations and report the best root trade.
    pub fn search(&mut self, iterations: u32) -> Result<SearchResult, SearchError> {
        let done = self.explore(iterations)?;
        self.result(done)
    }

    /// Run the configured number of iterations.
    pub fn run(&mut self) -> Result<SearchResult, SearchError> {
        self.search(self.config.iterations)
    }

    /// Grow the tree without extracting a result. Returns the number of
    /// iterations completed before the deadline.
    pub fn explore(&mut self, iterations: u32) -> Result<u32, SearchError> {
        let started = Instant::now();
        let mut done = 0;
        while done < iterations {
            if let Some(deadline) = self.config.deadline {
                if started.elapsed() >= deadline {
                    debug!(
                        focal = %self.focal.team,
                        done,
                        requested = iterations,
                        "Search deadline reached"
                    );
                    break;
                }
            }
            self.iterate()?;
            done += 1;
        }
        Ok(done)
    }

    /// One select -> expand -> simulate -> backpropagate pass.
    fn iterate(&mut self) -> Result<(), SearchError> {
        let mut current = self.select();

        let node = self.tree.get(current);
        if !node.is_terminal && !node.is_expanded {
            let children = self.expand(current)?;
            if !children.is_empty() {
                current = match self.config.expansion {
                    ExpansionPolicy::First => children[0],
                    ExpansionPolicy::Random => children[self.rng.gen_range(0..children.len())],
                };
            }
        }

        let reward = rollout(
            &self.tree.get(current).state,
            self.negotiation,
            &self.focal,
            self.policy,
            self.config.rollout_depth,
            &mut self.rng,
        )?;
        self.tree.backpropagate(current, reward);

        trace!(leaf = current.0, reward, "MCTS iteration complete");
        Ok(())
    }

    /// Descend by UCT while the node is expanded and has children.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();
        while !self.tree.get(current).is_leaf() {
            match self
                .tree
                .select_child(current, self.config.exploration, self.config.epsilon)
            {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    /// Materialize every admissible trade for the node's active team.
    fn expand(&mut self, node_id: NodeId) -> Result<Vec<NodeId>, SearchError> {
        let state = &self.tree.get(node_id).state;
        let candidates = self
            .negotiation
            .admissible_actions(state, state.active_team())?;

        let children: Vec<NodeId> = candidates
            .into_iter()
            .map(|c| self.tree.add_child(node_id, c.action, c.appraisal.state))
            .collect();
        self.tree.get_mut(node_id).is_expanded = true;

        if children.is_empty() {
            debug!(node = node_id.0, "Dead end: no admissible trades");
        }
        Ok(children)
    }

    fn result(&self, iterations: u32) -> Result<SearchResult, SearchError> {
        let best = self
            .tree
            .best_child(self.config.epsilon)
            .ok_or_else(|| SearchError::NoTradeFound(self.focal.team.clone()))?;
        let node = self.tree.get(best);
        let action = node
            .action
            .clone()
            .ok_or_else(|| SearchError::NoTradeFound(self.focal.team.clone()))?;

        let result = SearchResult {
            focal: self.focal.team.clone(),
            action,
            expected_reward: node.mean_reward(),
            baseline: self.focal.utility(&self.tree.get(self.tree.root()).state),
            visits: node.visit_count,
            iterations,
            tree: self.tree.stats(),
        };
        info!(
            focal = %result.focal,
            action = %result.action,
            expected_reward = result.expected_reward,
            visits = result.visits,
            iterations,
            nodes = result.tree.total_nodes,
            "Search complete"
        );
        Ok(result)
    }

    pub fn focal(&self) -> &Agent {
        &self.focal
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Convenience function to run one search with greedy rollouts. More than
/// one configured thread switches to root-parallel search.
pub fn run_search(
    state: &LeagueState,
    focal: &TeamId,
    negotiation: &Negotiation,
    config: MctsConfig,
) -> Result<SearchResult, SearchError> {
    if config.threads > 1 {
        return search_root_parallel(state, focal, negotiation, &GreedyPolicy, config);
    }
    TradeSearch::new(state, focal, negotiation, &GreedyPolicy, config)?.run()
}
