//! Settings shared by the trade API and the scanner.
//!
//! `CentralConfig` has one section per concern:
//!
//! | section    | drives                                                         |
//! |------------|----------------------------------------------------------------|
//! | `common`   | snapshot location and log level                                |
//! | `league`   | trade legality: cap floor, untouchables, need decay, cash ladder |
//! | `personas` | cap-space quantiles and the weights of each assigned persona   |
//! | `search`   | MCTS budget, UCT constant, turn order, seeding, threads        |
//! | `grading`  | asset-count imbalance and the fair-trade tolerance             |
//! | `web`      | bind address, CORS, per-request search budget                  |
//!
//! Values resolve from `config.defaults.toml` (compiled in), then the first
//! `config.toml` found (see [`CONFIG_SEARCH_PATHS`]), then environment
//! variables named `CAPALPHA_<SECTION>_<KEY>`:
//!
//! ```text
//! CAPALPHA_LEAGUE_CAP_FLOOR=-20
//! CAPALPHA_LEAGUE_COMPENSATION_LADDER=0,5,10
//! CAPALPHA_GRADING_BALANCE_TOLERANCE=0.1
//! CAPALPHA_WEB_MAX_SEARCH_ITERATIONS=5000
//! ```
//!
//! Loading never fails; range checks belong to the crates that turn a section
//! into runtime rules (`LeagueRules`, `GradingRules`, `MctsConfig`).

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
