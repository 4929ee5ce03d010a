//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from a crate directory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by CAPALPHA_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    if let Ok(path) = std::env::var("CAPALPHA_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from CAPALPHA_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "CAPALPHA_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<f64>, ...)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
    // Comma-separated list of parseable values
    ($config:expr, $section:ident . $field:ident, $key:expr, list) => {
        if let Ok(raw) = std::env::var($key) {
            let parsed: Result<Vec<_>, _> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse)
                .collect();
            match parsed {
                Ok(values) => $config.$section.$field = values,
                Err(_) => warn!("Ignoring malformed {}={}", $key, raw),
            }
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CAPALPHA_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.data_dir, "CAPALPHA_COMMON_DATA_DIR");
    env_override!(config, common.league_path, "CAPALPHA_COMMON_LEAGUE_PATH");
    env_override!(config, common.log_level, "CAPALPHA_COMMON_LOG_LEVEL");

    // League
    env_override!(
        config,
        league.cap_floor,
        "CAPALPHA_LEAGUE_CAP_FLOOR",
        optional_parse
    );
    env_override!(
        config,
        league.untouchable_value,
        "CAPALPHA_LEAGUE_UNTOUCHABLE_VALUE",
        parse
    );
    env_override!(
        config,
        league.need_decay,
        "CAPALPHA_LEAGUE_NEED_DECAY",
        parse
    );
    env_override!(
        config,
        league.compensation_ladder,
        "CAPALPHA_LEAGUE_COMPENSATION_LADDER",
        list
    );
    env_override!(
        config,
        league.target_top_need,
        "CAPALPHA_LEAGUE_TARGET_TOP_NEED",
        parse
    );

    // Personas
    env_override!(
        config,
        personas.stressed_quantile,
        "CAPALPHA_PERSONAS_STRESSED_QUANTILE",
        parse
    );
    env_override!(
        config,
        personas.rich_quantile,
        "CAPALPHA_PERSONAS_RICH_QUANTILE",
        parse
    );

    // Search
    env_override!(
        config,
        search.iterations,
        "CAPALPHA_SEARCH_ITERATIONS",
        parse
    );
    env_override!(
        config,
        search.exploration,
        "CAPALPHA_SEARCH_EXPLORATION",
        parse
    );
    env_override!(
        config,
        search.rollout_depth,
        "CAPALPHA_SEARCH_ROLLOUT_DEPTH",
        parse
    );
    env_override!(
        config,
        search.max_trade_depth,
        "CAPALPHA_SEARCH_MAX_TRADE_DEPTH",
        parse
    );
    env_override!(config, search.turn_order, "CAPALPHA_SEARCH_TURN_ORDER");
    env_override!(config, search.expansion, "CAPALPHA_SEARCH_EXPANSION");
    env_override!(config, search.seed, "CAPALPHA_SEARCH_SEED", parse);
    env_override!(
        config,
        search.deadline_ms,
        "CAPALPHA_SEARCH_DEADLINE_MS",
        parse
    );
    env_override!(config, search.threads, "CAPALPHA_SEARCH_THREADS", parse);

    // Grading
    env_override!(
        config,
        grading.imbalance_threshold,
        "CAPALPHA_GRADING_IMBALANCE_THRESHOLD",
        parse
    );
    env_override!(
        config,
        grading.balance_tolerance,
        "CAPALPHA_GRADING_BALANCE_TOLERANCE",
        parse
    );

    // Web
    env_override!(config, web.host, "CAPALPHA_WEB_HOST");
    env_override!(config, web.port, "CAPALPHA_WEB_PORT", parse);
    env_override!(
        config,
        web.max_search_iterations,
        "CAPALPHA_WEB_MAX_SEARCH_ITERATIONS",
        parse
    );

    config
}
