//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_data_dir() -> String {
    defaults::data_dir().into()
}
fn d_league_path() -> String {
    defaults::league_path().into()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_cap_floor() -> Option<f64> {
    defaults::cap_floor()
}
fn d_untouchable_value() -> f64 {
    defaults::untouchable_value()
}
fn d_need_decay() -> f64 {
    defaults::need_decay()
}
fn d_compensation_ladder() -> Vec<f64> {
    defaults::compensation_ladder().to_vec()
}
fn d_target_top_need() -> bool {
    defaults::target_top_need()
}
fn d_stressed_quantile() -> f64 {
    defaults::stressed_quantile()
}
fn d_rich_quantile() -> f64 {
    defaults::rich_quantile()
}
fn d_contender() -> PersonaWeights {
    defaults::contender().into()
}
fn d_rebuilder() -> PersonaWeights {
    defaults::rebuilder().into()
}
fn d_balanced() -> PersonaWeights {
    defaults::balanced().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_epsilon() -> f64 {
    defaults::epsilon()
}
fn d_rollout_depth() -> u32 {
    defaults::rollout_depth()
}
fn d_max_trade_depth() -> u32 {
    defaults::max_trade_depth()
}
fn d_turn_order() -> String {
    defaults::turn_order().into()
}
fn d_expansion() -> String {
    defaults::expansion().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_deadline_ms() -> u64 {
    defaults::deadline_ms()
}
fn d_threads() -> usize {
    defaults::threads()
}
fn d_imbalance_threshold() -> usize {
    defaults::imbalance_threshold()
}
fn d_balance_tolerance() -> f64 {
    defaults::balance_tolerance()
}
fn d_host() -> String {
    defaults::host().into()
}
fn d_port() -> u16 {
    defaults::port()
}
fn d_max_search_iterations() -> u32 {
    defaults::max_search_iterations()
}
fn d_allowed_origins() -> Vec<String> {
    defaults::allowed_origins().to_vec()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub league: LeagueConfig,
    #[serde(default)]
    pub personas: PersonasConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub web: WebConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_data_dir")]
    pub data_dir: String,
    /// League snapshot produced by the data pipeline.
    #[serde(default = "d_league_path")]
    pub league_path: String,
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir().into(),
            league_path: defaults::league_path().into(),
            log_level: defaults::log_level().into(),
        }
    }
}

/// Trade legality rules applied to every league state
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LeagueConfig {
    /// Hard floor for a team's cap space after a trade. None = unrestricted.
    #[serde(default = "d_cap_floor")]
    pub cap_floor: Option<f64>,
    /// Assets valued at or above this are never offered by their owner.
    #[serde(default = "d_untouchable_value")]
    pub untouchable_value: f64,
    /// Need intensity removed per acquired player at a position.
    #[serde(default = "d_need_decay")]
    pub need_decay: f64,
    /// Cash offsets (cap-equivalent millions) enumerated for asset-for-cash trades.
    #[serde(default = "d_compensation_ladder")]
    pub compensation_ladder: Vec<f64>,
    /// Only shop for players at the buyer's most severe need.
    #[serde(default = "d_target_top_need")]
    pub target_top_need: bool,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            cap_floor: defaults::cap_floor(),
            untouchable_value: defaults::untouchable_value(),
            need_decay: defaults::need_decay(),
            compensation_ladder: defaults::compensation_ladder().to_vec(),
            target_top_need: defaults::target_top_need(),
        }
    }
}

/// Win / cap / draft-capital weights for one persona
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PersonaWeights {
    pub win: f64,
    pub cap: f64,
    pub draft: f64,
}

impl From<defaults::WeightDefaults> for PersonaWeights {
    fn from(w: defaults::WeightDefaults) -> Self {
        Self {
            win: w.win,
            cap: w.cap,
            draft: w.draft,
        }
    }
}

/// Persona assignment by cap-space quantile
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PersonasConfig {
    /// Teams below this cap-space quantile play as contenders.
    #[serde(default = "d_stressed_quantile")]
    pub stressed_quantile: f64,
    /// Teams above this cap-space quantile play as rebuilders.
    #[serde(default = "d_rich_quantile")]
    pub rich_quantile: f64,
    #[serde(default = "d_contender")]
    pub contender: PersonaWeights,
    #[serde(default = "d_rebuilder")]
    pub rebuilder: PersonaWeights,
    #[serde(default = "d_balanced")]
    pub balanced: PersonaWeights,
}

impl Default for PersonasConfig {
    fn default() -> Self {
        Self {
            stressed_quantile: defaults::stressed_quantile(),
            rich_quantile: defaults::rich_quantile(),
            contender: defaults::contender().into(),
            rebuilder: defaults::rebuilder().into(),
            balanced: defaults::balanced().into(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    /// UCT exploration constant.
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_epsilon")]
    pub epsilon: f64,
    #[serde(default = "d_rollout_depth")]
    pub rollout_depth: u32,
    #[serde(default = "d_max_trade_depth")]
    pub max_trade_depth: u32,
    /// "focal_only" or "round_robin"
    #[serde(default = "d_turn_order")]
    pub turn_order: String,
    /// "first" or "random"
    #[serde(default = "d_expansion")]
    pub expansion: String,
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Wall-clock budget per search in milliseconds. 0 = no deadline.
    #[serde(default = "d_deadline_ms")]
    pub deadline_ms: u64,
    /// Independent root-parallel trees per search.
    #[serde(default = "d_threads")]
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            exploration: defaults::exploration(),
            epsilon: defaults::epsilon(),
            rollout_depth: defaults::rollout_depth(),
            max_trade_depth: defaults::max_trade_depth(),
            turn_order: defaults::turn_order().into(),
            expansion: defaults::expansion().into(),
            seed: defaults::seed(),
            deadline_ms: defaults::deadline_ms(),
            threads: defaults::threads(),
        }
    }
}

/// Proposal grading thresholds
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GradingConfig {
    /// Largest tolerated difference in asset counts between the two sides.
    #[serde(default = "d_imbalance_threshold")]
    pub imbalance_threshold: usize,
    /// Share of the value a side gives up that it may lose and still call
    /// the trade fair.
    #[serde(default = "d_balance_tolerance")]
    pub balance_tolerance: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            imbalance_threshold: defaults::imbalance_threshold(),
            balance_tolerance: defaults::balance_tolerance(),
        }
    }
}

/// Web server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WebConfig {
    #[serde(default = "d_host")]
    pub host: String,
    #[serde(default = "d_port")]
    pub port: u16,
    /// Upper bound on the iterations one API search request may ask for.
    #[serde(default = "d_max_search_iterations")]
    pub max_search_iterations: u32,
    /// CORS allowed origins. Empty = allow all origins.
    #[serde(default = "d_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: defaults::host().into(),
            port: defaults::port(),
            max_search_iterations: defaults::max_search_iterations(),
            allowed_origins: defaults::allowed_origins().to_vec(),
        }
    }
}
