//! Team personas and the utility each team maximizes.

use std::collections::BTreeMap;

use league_config::{PersonaWeights, PersonasConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::asset::TeamId;
use crate::error::{LeagueError, Result};
use crate::state::LeagueState;
use crate::team::TeamState;

/// Win / cap / draft-capital weighting of a front office.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamPersona {
    pub win: f64,
    pub cap: f64,
    pub draft: f64,
}

impl TeamPersona {
    pub const CONTENDER: TeamPersona = TeamPersona {
        win: 0.8,
        cap: 0.1,
        draft: 0.1,
    };

    pub const REBUILDER: TeamPersona = TeamPersona {
        win: 0.1,
        cap: 0.4,
        draft: 0.5,
    };

    pub const BALANCED: TeamPersona = TeamPersona {
        win: 0.5,
        cap: 0.3,
        draft: 0.2,
    };

    /// Weights must be finite and non-negative.
    pub fn new(win: f64, cap: f64, draft: f64) -> Result<Self> {
        for (name, w) in [("win", win), ("cap", cap), ("draft", draft)] {
            if !w.is_finite() || w < 0.0 {
                return Err(LeagueError::InvalidPersona(format!(
                    "{name} weight must be a non-negative number, got {w}"
                )));
            }
        }
        Ok(Self { win, cap, draft })
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "contender" => Ok(Self::CONTENDER),
            "rebuilder" => Ok(Self::REBUILDER),
            "balanced" | "middle" => Ok(Self::BALANCED),
            other => Err(LeagueError::InvalidPersona(format!(
                "unknown persona preset '{other}'"
            ))),
        }
    }

    /// Scale the weights to sum to one. All-zero personas are returned as is.
    pub fn normalized(self) -> Self {
        let total = self.win + self.cap + self.draft;
        if total <= 0.0 {
            return self;
        }
        Self {
            win: self.win / total,
            cap: self.cap / total,
            draft: self.draft / total,
        }
    }

    pub fn score(&self, team: &TeamState) -> f64 {
        self.win * team.roster_value + self.cap * team.cap_space + self.draft * team.draft_capital
    }
}

impl TryFrom<PersonaWeights> for TeamPersona {
    type Error = LeagueError;

    fn try_from(w: PersonaWeights) -> Result<Self> {
        Self::new(w.win, w.cap, w.draft)
    }
}

/// A team bound to its persona for the duration of one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agent {
    pub team: TeamId,
    pub persona: TeamPersona,
}

impl Agent {
    pub fn new(team: impl Into<TeamId>, persona: TeamPersona) -> Self {
        Self {
            team: team.into(),
            persona,
        }
    }

    /// Utility of this agent's team in `state`. Only comparable against other
    /// states for the same team. A team missing from `state` scores zero.
    pub fn utility(&self, state: &LeagueState) -> f64 {
        state
            .team(&self.team)
            .map_or(0.0, |team| self.persona.score(team))
    }

    pub fn delta_utility(&self, before: &LeagueState, after: &LeagueState) -> f64 {
        self.utility(after) - self.utility(before)
    }
}

/// Cap-space quantile cutoffs and the persona each band plays as.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaRules {
    pub stressed_quantile: f64,
    pub rich_quantile: f64,
    pub contender: TeamPersona,
    pub rebuilder: TeamPersona,
    pub balanced: TeamPersona,
}

impl PersonaRules {
    pub fn from_config(config: &PersonasConfig) -> Result<Self> {
        for q in [config.stressed_quantile, config.rich_quantile] {
            if !(0.0..=1.0).contains(&q) {
                return Err(LeagueError::InvalidPersona(format!(
                    "quantile {q} is outside [0, 1]"
                )));
            }
        }
        Ok(Self {
            stressed_quantile: config.stressed_quantile,
            rich_quantile: config.rich_quantile,
            contender: config.contender.try_into()?,
            rebuilder: config.rebuilder.try_into()?,
            balanced: config.balanced.try_into()?,
        })
    }
}

/// Give every team an agent. Cap-strapped teams (below the stressed quantile)
/// play to win now, cap-rich teams (above the rich quantile) rebuild, the rest
/// are balanced. Entries in `overrides` take precedence.
pub fn assign_personas(
    state: &LeagueState,
    rules: &PersonaRules,
    overrides: &BTreeMap<TeamId, TeamPersona>,
) -> BTreeMap<TeamId, Agent> {
    let mut cap: Vec<f64> = state.teams().map(|t| t.cap_space).collect();
    cap.sort_by(f64::total_cmp);
    let low = quantile(&cap, rules.stressed_quantile);
    let high = quantile(&cap, rules.rich_quantile);

    state
        .teams()
        .map(|team| {
            let persona = match overrides.get(&team.id) {
                Some(persona) => *persona,
                None if team.cap_space < low => rules.contender,
                None if team.cap_space > high => rules.rebuilder,
                None => rules.balanced,
            };
            debug!(team = %team.id, cap_space = team.cap_space, ?persona, "Assigned persona");
            (team.id.clone(), Agent::new(team.id.clone(), persona))
        })
        .collect()
}

/// Linear-interpolation quantile of an ascending slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}
