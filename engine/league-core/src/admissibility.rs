//! Trade legality and acceptance filter.
//!
//! A trade may become a search edge only if both parties would sign it:
//! neither side loses utility and at least one side gains.

use std::collections::BTreeMap;

use tracing::trace;

use crate::action::TradeAction;
use crate::agent::{assign_personas, Agent, PersonaRules, TeamPersona};
use crate::asset::TeamId;
use crate::error::{IllegalAction, LeagueError, Result};
use crate::state::LeagueState;

/// Float noise tolerated when comparing utility deltas against zero.
pub const DELTA_TOLERANCE: f64 = 1e-9;

/// Both deltas non-negative, at least one strictly positive.
pub fn is_admissible(source_delta: f64, target_delta: f64) -> bool {
    source_delta >= -DELTA_TOLERANCE
        && target_delta >= -DELTA_TOLERANCE
        && (source_delta > DELTA_TOLERANCE || target_delta > DELTA_TOLERANCE)
}

/// Outcome of applying one action, seen by both parties.
#[derive(Debug, Clone)]
pub struct Appraisal {
    pub state: LeagueState,
    pub source_delta: f64,
    pub target_delta: f64,
}

impl Appraisal {
    pub fn is_admissible(&self) -> bool {
        is_admissible(self.source_delta, self.target_delta)
    }

    /// Neither side is worse off. Unlike admissibility this accepts null trades.
    pub fn is_acceptable(&self) -> bool {
        self.source_delta >= -DELTA_TOLERANCE && self.target_delta >= -DELTA_TOLERANCE
    }

    pub fn source_rejects(&self) -> bool {
        self.source_delta < -DELTA_TOLERANCE
    }

    pub fn target_rejects(&self) -> bool {
        self.target_delta < -DELTA_TOLERANCE
    }
}

/// An admissible action together with its appraisal.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub action: TradeAction,
    pub appraisal: Appraisal,
}

/// The agents sitting at the table for one search or one evaluation.
#[derive(Debug, Clone, Default)]
pub struct Negotiation {
    agents: BTreeMap<TeamId, Agent>,
}

impl Negotiation {
    pub fn new(agents: impl IntoIterator<Item = Agent>) -> Self {
        Self {
            agents: agents
                .into_iter()
                .map(|agent| (agent.team.clone(), agent))
                .collect(),
        }
    }

    /// Assign personas to every team in `state` by cap-space quantile.
    pub fn from_state(
        state: &LeagueState,
        rules: &PersonaRules,
        overrides: &BTreeMap<TeamId, TeamPersona>,
    ) -> Self {
        Self {
            agents: assign_personas(state, rules, overrides),
        }
    }

    pub fn agent(&self, team: &TeamId) -> Result<&Agent> {
        self.agents
            .get(team)
            .ok_or_else(|| LeagueError::UnknownTeam(team.clone()))
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn delta(&self, team: &TeamId, before: &LeagueState, after: &LeagueState) -> Result<f64> {
        Ok(self.agent(team)?.delta_utility(before, after))
    }

    /// Apply `action` and measure both parties' deltas.
    pub fn evaluate(&self, state: &LeagueState, action: &TradeAction) -> Result<Appraisal> {
        let next = state.apply(action)?;
        self.appraise(state, action, next)
    }

    /// `Ok(None)` when the action is inadmissible or breaches the cap floor.
    /// Any other illegality is a caller error and propagates.
    pub fn admit(&self, state: &LeagueState, action: &TradeAction) -> Result<Option<Appraisal>> {
        let next = match state.apply(action) {
            Ok(next) => next,
            Err(IllegalAction::CapFloorBreached { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let appraisal = self.appraise(state, action, next)?;
        if appraisal.is_admissible() {
            Ok(Some(appraisal))
        } else {
            Ok(None)
        }
    }

    /// Admissible trades `team` can propose from `state`, in legal-action order.
    pub fn admissible_actions(&self, state: &LeagueState, team: &TeamId) -> Result<Vec<Candidate>> {
        let actions = state.legal_actions(team);
        let total = actions.len();
        let mut candidates = Vec::new();
        for action in actions {
            if let Some(appraisal) = self.admit(state, &action)? {
                candidates.push(Candidate { action, appraisal });
            }
        }
        trace!(
            team = %team,
            legal = total,
            admissible = candidates.len(),
            "Filtered trade candidates"
        );
        Ok(candidates)
    }

    fn appraise(
        &self,
        before: &LeagueState,
        action: &TradeAction,
        after: LeagueState,
    ) -> Result<Appraisal> {
        let source_delta = self.delta(&action.source, before, &after)?;
        let target_delta = self.delta(&action.target, before, &after)?;
        Ok(Appraisal {
            state: after,
            source_delta,
            target_delta,
        })
    }
}
