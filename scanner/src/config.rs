//! Command-line configuration for the scanner.
//!
//! Flag defaults come from config.toml (with `CAPALPHA_*` overrides); flags
//! given on the command line win.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use league_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
pub static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_league() -> String {
    CENTRAL_CONFIG.common.league_path.clone()
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.search.iterations
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.search.seed
}

fn default_threads() -> usize {
    CENTRAL_CONFIG.search.threads
}

#[derive(Parser, Debug, Clone)]
#[command(name = "scanner")]
#[command(about = "League trade scanner - scan a snapshot or search one team's best trade")]
#[command(
    long_about = "Loads a league snapshot, assigns personas by cap-space quantile and either
ranks mutually beneficial trades across the league or runs MCTS for one team.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Cli {
    /// League snapshot (JSON)
    #[arg(long, global = true, default_value_t = default_league())]
    pub league: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value_t = default_log_level())]
    pub log_level: String,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank trades that help both buyer and seller
    Scan(ScanArgs),
    /// Search the best trade for one team
    Search(SearchArgs),
    /// Rank the teams best placed to take an asset
    Partners(PartnersArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Number of trades to print
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Focal team abbreviation, e.g. BUF
    #[arg(long)]
    pub team: String,

    /// MCTS iterations (per thread)
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// RNG seed
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Root-parallel worker threads
    #[arg(long, default_value_t = default_threads())]
    pub threads: usize,
}

#[derive(Args, Debug, Clone)]
pub struct PartnersArgs {
    /// Asset id
    #[arg(long)]
    pub asset: String,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if self.league.is_empty() {
            return Err(anyhow!("league path cannot be empty"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if let Command::Search(args) = &self.command {
            if args.team.trim().is_empty() {
                return Err(anyhow!("team cannot be empty"));
            }
            if args.threads == 0 {
                return Err(anyhow!("threads must be at least 1"));
            }
        }

        Ok(())
    }
}
