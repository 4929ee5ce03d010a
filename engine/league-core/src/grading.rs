//! Human-facing A-F grade for a proposed trade.
//!
//! Grading is explanatory only and never gates search admissibility.

use std::fmt;

use league_config::GradingConfig;
use serde::Serialize;

use crate::action::TradeAction;
use crate::admissibility::{Appraisal, Negotiation, DELTA_TOLERANCE};
use crate::asset::TeamId;
use crate::error::{LeagueError, Result};
use crate::state::LeagueState;
use crate::team::TeamState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn status(self) -> Status {
        match self {
            Grade::A | Grade::B => Status::Accepted,
            _ => Status::Rejected,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Accepted,
    Rejected,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Accepted => f.write_str("accepted"),
            Status::Rejected => f.write_str("rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradingRules {
    /// Largest tolerated difference in asset counts between the two sides.
    pub imbalance_threshold: usize,
    /// A side losing no more than this share of the value it gives up still
    /// counts as even.
    pub balance_tolerance: f64,
}

impl GradingRules {
    pub fn from_config(config: &GradingConfig) -> Result<Self> {
        let tolerance = config.balance_tolerance;
        if !(0.0..=1.0).contains(&tolerance) {
            return Err(LeagueError::InvalidRules(format!(
                "balance_tolerance must be in [0, 1], got {tolerance}"
            )));
        }
        Ok(Self {
            imbalance_threshold: config.imbalance_threshold,
            balance_tolerance: tolerance,
        })
    }

    /// Largest loss `team` can take in `action` and still call it fair.
    fn allowance(&self, state: &LeagueState, action: &TradeAction, team: &TeamId) -> f64 {
        DELTA_TOLERANCE + self.balance_tolerance * outgoing_value(state, action, team)
    }
}

impl Default for GradingRules {
    fn default() -> Self {
        let config = GradingConfig::default();
        Self {
            imbalance_threshold: config.imbalance_threshold,
            balance_tolerance: config.balance_tolerance,
        }
    }
}

/// Value of the assets `team` hands over, sweetener included.
fn outgoing_value(state: &LeagueState, action: &TradeAction, team: &TeamId) -> f64 {
    let ids = if team == &action.source {
        &action.assets
    } else {
        &action.compensation.assets
    };
    let listed: f64 = ids
        .iter()
        .filter_map(|id| state.asset(id))
        .map(|asset| asset.value)
        .sum();
    let sweetener = action
        .sweetener
        .as_ref()
        .filter(|s| &s.team == team)
        .map_or(0.0, |s| s.value);
    listed + sweetener
}

/// Per-side breakdown attached to graded proposals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub financial_impact: String,
    pub roster_impact: String,
    pub source_delta: f64,
    pub target_delta: f64,
    pub source_cap_change: f64,
    pub target_cap_change: f64,
    pub source_roster_change: f64,
    pub target_roster_change: f64,
}

impl Analysis {
    fn new(before: &LeagueState, action: &TradeAction, appraisal: &Appraisal) -> Self {
        let after = &appraisal.state;
        let source_cap_change = change(before, after, &action.source, |t| t.cap_space);
        let target_cap_change = change(before, after, &action.target, |t| t.cap_space);
        let source_roster_change = change(before, after, &action.source, |t| t.roster_value);
        let target_roster_change = change(before, after, &action.target, |t| t.roster_value);
        Self {
            financial_impact: impact(action, source_cap_change, target_cap_change),
            roster_impact: impact(action, source_roster_change, target_roster_change),
            source_delta: appraisal.source_delta,
            target_delta: appraisal.target_delta,
            source_cap_change,
            target_cap_change,
            source_roster_change,
            target_roster_change,
        }
    }
}

fn change(
    before: &LeagueState,
    after: &LeagueState,
    team: &TeamId,
    field: impl Fn(&TeamState) -> f64,
) -> f64 {
    match (before.team(team), after.team(team)) {
        (Some(b), Some(a)) => field(a) - field(b),
        _ => 0.0,
    }
}

fn impact(action: &TradeAction, source_change: f64, target_change: f64) -> String {
    let edge = source_change - target_change;
    if edge.abs() <= DELTA_TOLERANCE {
        "neutral".to_string()
    } else if edge > 0.0 {
        format!("favors {}", action.source)
    } else {
        format!("favors {}", action.target)
    }
}

/// Grade, status and explanation for one proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub grade: Grade,
    pub status: Status,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

impl Verdict {
    fn new(grade: Grade, reason: impl Into<String>, analysis: Option<Analysis>) -> Self {
        Self {
            grade,
            status: grade.status(),
            reason: reason.into(),
            analysis,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == Status::Accepted
    }
}

/// Grade `action` against `state`. Pure: the same inputs always produce the
/// same verdict.
pub fn grade(
    state: &LeagueState,
    action: &TradeAction,
    negotiation: &Negotiation,
    rules: &GradingRules,
) -> Verdict {
    let source_count = action.source_asset_count();
    let target_count = action.target_asset_count();
    if source_count == 0 || target_count == 0 {
        return Verdict::new(Grade::F, "Empty trade proposal.", None);
    }

    let appraisal = match negotiation.evaluate(state, action) {
        Ok(appraisal) => appraisal,
        Err(e) => return Verdict::new(Grade::F, format!("Illegal proposal: {e}"), None),
    };
    let analysis = Some(Analysis::new(state, action, &appraisal));

    if source_count.abs_diff(target_count) > rules.imbalance_threshold {
        return Verdict::new(
            Grade::D,
            "Lopsided asset count. The GM demands balance.",
            analysis,
        );
    }

    let source_ok =
        appraisal.source_delta >= -rules.allowance(state, action, &action.source);
    let target_ok =
        appraisal.target_delta >= -rules.allowance(state, action, &action.target);
    match (source_ok, target_ok) {
        _ if appraisal.source_delta > DELTA_TOLERANCE && appraisal.target_delta > DELTA_TOLERANCE => {
            Verdict::new(Grade::A, "Both sides come out ahead.", analysis)
        }
        (true, true) => Verdict::new(Grade::B, "Fair exchange of assets.", analysis),
        (false, true) | (true, false) => {
            let (team, delta) = if source_ok {
                (&action.target, appraisal.target_delta)
            } else {
                (&action.source, appraisal.source_delta)
            };
            Verdict::new(
                Grade::C,
                format!("{team} is worse off by {:.2}. A counter-offer may close the gap.", -delta),
                analysis,
            )
        }
        (false, false) => Verdict::new(Grade::D, "Both sides are worse off.", analysis),
    }
}
