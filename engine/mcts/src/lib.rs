//! Monte Carlo Tree Search over admissible trade sequences.
//!
//! The search walks the league state space from a focal team's point of view.
//! Edges are trades that every party would voluntarily sign, so the tree only
//! contains negotiable sequences.
//!
//! # Overview
//!
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: descend expanded nodes by UCT,
//!    `reward/(visits+eps) + c * sqrt(ln(parent_visits+1)/(visits+eps))`
//! 2. **Expansion**: materialize every admissible trade for the active team
//! 3. **Simulation**: roll out with a [`RolloutPolicy`] and score the focal
//!    team's utility in the final state
//! 4. **Backpropagation**: add one visit and the reward to every node on the
//!    path
//!
//! # Usage
//!
//! ```rust,ignore
//! use league_core::{LeagueSnapshot, LeagueRules, Negotiation, PersonaRules, TeamId, Turn, TurnOrder};
//! use mcts::{run_search, MctsConfig};
//!
//! let snapshot = LeagueSnapshot::load("data/league.json".as_ref())?;
//! let state = snapshot.to_state(LeagueRules::default(), Turn::new("BUF", TurnOrder::FocalOnly, 3))?;
//! let negotiation = Negotiation::from_state(&state, &persona_rules, &snapshot.personas()?);
//!
//! let result = run_search(&state, &TeamId::from("BUF"), &negotiation, MctsConfig::default())?;
//! println!("{} (+{:.2})", result.action, result.improvement());
//! ```

pub mod config;
pub mod node;
pub mod parallel;
pub mod policy;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{ExpansionPolicy, MctsConfig};
pub use node::{MctsNode, NodeId};
pub use parallel::{search_root_parallel, worker_seed};
pub use policy::{rollout, GreedyPolicy, RandomPolicy, RolloutPolicy};
pub use search::{run_search, SearchError, SearchResult, TradeSearch};
pub use tree::{ChildStats, MctsTree, TreeStats};
