//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so every binary in the
//! workspace starts from identical values, even without a config.toml.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    league: LeagueDefaults,
    personas: PersonaDefaults,
    search: SearchDefaults,
    grading: GradingDefaults,
    web: WebDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    data_dir: String,
    league_path: String,
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct LeagueDefaults {
    #[serde(default)]
    cap_floor: Option<f64>,
    untouchable_value: f64,
    need_decay: f64,
    compensation_ladder: Vec<f64>,
    target_top_need: bool,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub(crate) struct WeightDefaults {
    pub(crate) win: f64,
    pub(crate) cap: f64,
    pub(crate) draft: f64,
}

#[derive(Debug, Deserialize)]
struct PersonaDefaults {
    stressed_quantile: f64,
    rich_quantile: f64,
    contender: WeightDefaults,
    rebuilder: WeightDefaults,
    balanced: WeightDefaults,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    iterations: u32,
    exploration: f64,
    epsilon: f64,
    rollout_depth: u32,
    max_trade_depth: u32,
    turn_order: String,
    expansion: String,
    seed: u64,
    deadline_ms: u64,
    threads: usize,
}

#[derive(Debug, Deserialize)]
struct GradingDefaults {
    imbalance_threshold: usize,
    balance_tolerance: f64,
}

#[derive(Debug, Deserialize)]
struct WebDefaults {
    host: String,
    port: u16,
    max_search_iterations: u32,
    allowed_origins: Vec<String>,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn data_dir() -> &'static str {
    &DEFAULTS.common.data_dir
}
pub fn league_path() -> &'static str {
    &DEFAULTS.common.league_path
}
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// League rules
pub fn cap_floor() -> Option<f64> {
    DEFAULTS.league.cap_floor
}
pub fn untouchable_value() -> f64 {
    DEFAULTS.league.untouchable_value
}
pub fn need_decay() -> f64 {
    DEFAULTS.league.need_decay
}
pub fn compensation_ladder() -> &'static [f64] {
    &DEFAULTS.league.compensation_ladder
}
pub fn target_top_need() -> bool {
    DEFAULTS.league.target_top_need
}

// Personas
pub fn stressed_quantile() -> f64 {
    DEFAULTS.personas.stressed_quantile
}
pub fn rich_quantile() -> f64 {
    DEFAULTS.personas.rich_quantile
}
pub(crate) fn contender() -> WeightDefaults {
    DEFAULTS.personas.contender
}
pub(crate) fn rebuilder() -> WeightDefaults {
    DEFAULTS.personas.rebuilder
}
pub(crate) fn balanced() -> WeightDefaults {
    DEFAULTS.personas.balanced
}

// Search
pub fn iterations() -> u32 {
    DEFAULTS.search.iterations
}
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn epsilon() -> f64 {
    DEFAULTS.search.epsilon
}
pub fn rollout_depth() -> u32 {
    DEFAULTS.search.rollout_depth
}
pub fn max_trade_depth() -> u32 {
    DEFAULTS.search.max_trade_depth
}
pub fn turn_order() -> &'static str {
    &DEFAULTS.search.turn_order
}
pub fn expansion() -> &'static str {
    &DEFAULTS.search.expansion
}
pub fn seed() -> u64 {
    DEFAULTS.search.seed
}
pub fn deadline_ms() -> u64 {
    DEFAULTS.search.deadline_ms
}
pub fn threads() -> usize {
    DEFAULTS.search.threads
}

// Grading
pub fn imbalance_threshold() -> usize {
    DEFAULTS.grading.imbalance_threshold
}
pub fn balance_tolerance() -> f64 {
    DEFAULTS.grading.balance_tolerance
}

// Web
pub fn host() -> &'static str {
    &DEFAULTS.web.host
}
pub fn port() -> u16 {
    DEFAULTS.web.port
}
pub fn max_search_iterations() -> u32 {
    DEFAULTS.web.max_search_iterations
}
pub fn allowed_origins() -> &'static [String] {
    &DEFAULTS.web.allowed_origins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        assert_eq!(data_dir(), "./data");
        assert_eq!(league_path(), "./data/league.json");
        assert_eq!(log_level(), "info");
    }

    #[test]
    fn test_league_defaults() {
        assert!(cap_floor().is_none());
        assert!((untouchable_value() - 9.5).abs() < f64::EPSILON);
        assert!((need_decay() - 0.25).abs() < f64::EPSILON);
        assert_eq!(compensation_ladder(), &[0.0, 2.5, 5.0, 10.0]);
        assert!(!target_top_need());
    }

    #[test]
    fn test_persona_defaults() {
        assert!((stressed_quantile() - 0.25).abs() < f64::EPSILON);
        assert!((rich_quantile() - 0.75).abs() < f64::EPSILON);
        assert!((contender().win - 0.8).abs() < f64::EPSILON);
        assert!((rebuilder().cap - 0.6).abs() < f64::EPSILON);
        assert!((balanced().draft - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(iterations(), 1000);
        assert!((exploration() - 1.41).abs() < f64::EPSILON);
        assert_eq!(turn_order(), "focal_only");
        assert_eq!(expansion(), "first");
        assert_eq!(deadline_ms(), 0);
        assert_eq!(threads(), 1);
    }

    #[test]
    fn test_grading_and_web_defaults() {
        assert_eq!(imbalance_threshold(), 2);
        assert!((balance_tolerance() - 0.05).abs() < f64::EPSILON);
        assert_eq!(port(), 8000);
        assert_eq!(max_search_iterations(), 20000);
    }
}
