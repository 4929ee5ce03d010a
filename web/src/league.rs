//! The league the API serves, loaded once from the configured snapshot.

use std::path::Path;

use anyhow::{bail, Context};
use league_config::CentralConfig;
use league_core::{
    GradingRules, LeagueRules, LeagueSnapshot, LeagueState, Negotiation, PersonaRules, Turn,
};
use mcts::MctsConfig;
use tracing::info;

/// Everything a request needs to grade, counter or search a trade.
/// Immutable once built; handlers share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LeagueContext {
    pub state: LeagueState,
    pub negotiation: Negotiation,
    pub grading: GradingRules,
    pub search: MctsConfig,
}

impl LeagueContext {
    pub fn new(
        state: LeagueState,
        negotiation: Negotiation,
        grading: GradingRules,
        search: MctsConfig,
    ) -> Self {
        Self {
            state,
            negotiation,
            grading,
            search,
        }
    }

    /// Load the snapshot at `common.league_path` and assign personas.
    pub fn load(config: &CentralConfig) -> anyhow::Result<Self> {
        let path = Path::new(&config.common.league_path);
        let snapshot = LeagueSnapshot::load(path)
            .with_context(|| format!("loading league snapshot {}", path.display()))?;
        Self::from_snapshot(&snapshot, config)
    }

    pub fn from_snapshot(snapshot: &LeagueSnapshot, config: &CentralConfig) -> anyhow::Result<Self> {
        let Some(first) = snapshot.teams.first() else {
            bail!("league snapshot has no teams");
        };
        let search = MctsConfig::from_config(&config.search)?;
        let rules = LeagueRules::from_config(&config.league)?;
        // Searches re-root the turn on their own focal team.
        let turn = Turn::new(first.id.clone(), search.turn_order, search.max_trade_depth);
        let state = snapshot.to_state(rules, turn)?;

        let personas = PersonaRules::from_config(&config.personas)?;
        let negotiation = Negotiation::from_state(&state, &personas, &snapshot.personas()?);

        info!(
            teams = snapshot.teams.len(),
            assets = snapshot.assets.len(),
            iterations = search.iterations,
            "League context ready"
        );
        Ok(Self::new(
            state,
            negotiation,
            GradingRules::from_config(&config.grading)?,
            search,
        ))
    }
}
