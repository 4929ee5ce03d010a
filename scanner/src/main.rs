//! Scanner - league-wide trade scan and single-team trade search
//!
//! A one-shot CLI over a league snapshot file:
//! 1. `scan` ranks single trades that help both buyer and seller
//! 2. `search` runs MCTS for one focal team and prints the best opening trade
//! 3. `partners` ranks the teams best placed to take on an asset

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::info;

mod commands;
mod config;

use crate::commands::League;
use crate::config::{Cli, Command, CENTRAL_CONFIG};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    init_tracing(&cli.log_level)?;
    info!(league = %cli.league, "Loading league");

    let league = League::load(Path::new(&cli.league), &CENTRAL_CONFIG)?;
    let output = match &cli.command {
        Command::Scan(args) => commands::scan(&league, args, cli.json)?,
        Command::Search(args) => commands::search(&league, args, &CENTRAL_CONFIG, cli.json)?,
        Command::Partners(args) => commands::partners(&league, args, cli.json)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}
