//! Counter-offers for proposals rejected by exactly one side.
//!
//! The rejecting team is made whole with a synthetic draft-pick equivalent
//! from the other side, sized to close its utility gap exactly.

use serde::Serialize;
use tracing::{debug, info};

use crate::action::TradeAction;
use crate::admissibility::{Negotiation, DELTA_TOLERANCE};
use crate::asset::{Asset, AssetId, TeamId};
use crate::error::{LeagueError, Result};
use crate::state::LeagueState;

/// Risk score attached to synthetic compensation picks.
const SWEETENER_RISK: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterOffer {
    pub rejecting_team: TeamId,
    /// Utility the rejecting team was short by.
    pub gap: f64,
    /// Value of the sweetener in cap-equivalent units.
    pub compensation: f64,
    pub sweetener: Asset,
    /// The original proposal with the sweetener attached.
    pub revised: TradeAction,
}

fn infeasible(team: &TeamId, reason: impl Into<String>) -> LeagueError {
    LeagueError::NoFeasibleCounter {
        team: team.clone(),
        reason: reason.into(),
    }
}

/// Smallest sweetener that makes the rejecting side of `action` break even.
pub fn counter_offer(
    state: &LeagueState,
    action: &TradeAction,
    negotiation: &Negotiation,
) -> Result<CounterOffer> {
    let appraisal = negotiation.evaluate(state, action)?;
    let (rejecting, giver, delta, outgoing) =
        match (appraisal.source_rejects(), appraisal.target_rejects()) {
            (true, false) => (
                &action.source,
                &action.target,
                appraisal.source_delta,
                &action.assets,
            ),
            (false, true) => (
                &action.target,
                &action.source,
                appraisal.target_delta,
                &action.compensation.assets,
            ),
            (true, true) => return Err(infeasible(&action.source, "both sides reject the trade")),
            (false, false) => return Err(infeasible(&action.source, "neither side rejects the trade")),
        };

    if action.sweetener.is_some() {
        return Err(infeasible(rejecting, "the proposal already carries a sweetener"));
    }
    if let Some(asset) = outgoing
        .iter()
        .filter_map(|id| state.asset(id))
        .find(|asset| state.rules().is_untouchable(asset))
    {
        return Err(infeasible(
            rejecting,
            format!("{} is untouchable at any price", asset.id),
        ));
    }

    let draft_weight = negotiation.agent(rejecting)?.persona.draft;
    if draft_weight <= 0.0 {
        return Err(infeasible(rejecting, "draft capital carries no weight"));
    }

    let gap = -delta;
    let compensation = gap / draft_weight;
    let sweetener = Asset::draft_pick(
        sweetener_id(state, giver),
        format!("Compensatory pick ({giver} to {rejecting})"),
        giver.clone(),
        compensation,
    )
    .with_risk(SWEETENER_RISK);
    let revised = action.clone().with_sweetener(sweetener.clone());

    let revised_appraisal = negotiation.evaluate(state, &revised)?;
    let giver_delta = if giver == &action.source {
        revised_appraisal.source_delta
    } else {
        revised_appraisal.target_delta
    };
    if giver_delta < -DELTA_TOLERANCE {
        debug!(
            giver = %giver,
            giver_delta,
            compensation,
            "Sweetener would sink the giver"
        );
        return Err(infeasible(
            rejecting,
            format!("a {compensation:.2} sweetener would leave {giver} worse off"),
        ));
    }

    info!(
        rejecting = %rejecting,
        giver = %giver,
        gap,
        compensation,
        "Built counter-offer"
    );
    Ok(CounterOffer {
        rejecting_team: rejecting.clone(),
        gap,
        compensation,
        sweetener,
        revised,
    })
}

/// First `<giver>_comp_pick_<n>` not already registered.
fn sweetener_id(state: &LeagueState, giver: &TeamId) -> AssetId {
    (1u32..)
        .map(|n| AssetId::new(format!("{giver}_comp_pick_{n}")))
        .find(|id| state.asset(id).is_none())
        .unwrap_or_else(|| AssetId::new(format!("{giver}_comp_pick")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Agent, TeamPersona};
    use crate::fixtures;

    #[test]
    fn test_closable_gap_returns_exact_value() {
        let (state, negotiation) = fixtures::market();
        // MIA sends m_wr for j_wr1. NYJ (rebuilder) pays 8M more cap for
        // 0.5 value: 0.1 * 0.5 - 0.4 * 8 = -3.15.
        let action = TradeAction::swap("MIA", "NYJ", "m_wr", "j_wr1");
        let offer = counter_offer(&state, &action, &negotiation).unwrap();

        assert_eq!(offer.rejecting_team, TeamId::from("NYJ"));
        assert!((offer.gap - 3.15).abs() < 1e-9);
        // Rebuilder draft weight 0.5.
        assert!((offer.compensation - 6.3).abs() < 1e-9);
        assert_eq!(offer.sweetener.team, TeamId::from("MIA"));
        assert!(offer.sweetener.is_pick());
        assert_eq!(offer.sweetener.id.as_str(), "MIA_comp_pick_1");

        let revised = negotiation.evaluate(&state, &offer.revised).unwrap();
        assert!(revised.target_delta.abs() < 1e-9);
        assert!(revised.source_delta >= 0.0);
        assert!(revised.is_acceptable());
    }

    #[test]
    fn test_untouchable_asset_is_infeasible() {
        let (state, _) = fixtures::market();
        let negotiation = Negotiation::new([
            Agent::new("BUF", TeamPersona::CONTENDER),
            Agent::new("MIA", TeamPersona::CONTENDER),
        ]);
        // BUF hands its franchise quarterback to MIA for a tight end and loses.
        let action = TradeAction::swap("BUF", "MIA", "b_qb", "m_te");
        let err = counter_offer(&state, &action, &negotiation).unwrap_err();
        match err {
            LeagueError::NoFeasibleCounter { team, reason } => {
                assert_eq!(team, TeamId::from("BUF"));
                assert!(reason.contains("untouchable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_draft_weight_is_infeasible() {
        let (state, _) = fixtures::market();
        let negotiation = Negotiation::new([
            Agent::new("BUF", TeamPersona::CONTENDER),
            Agent::new("MIA", TeamPersona::BALANCED),
            Agent::new("NYJ", TeamPersona::new(0.1, 0.9, 0.0).unwrap()),
        ]);
        let action = TradeAction::swap("MIA", "NYJ", "m_wr", "j_wr1");
        assert!(matches!(
            counter_offer(&state, &action, &negotiation),
            Err(LeagueError::NoFeasibleCounter { .. })
        ));
    }

    #[test]
    fn test_accepted_trade_needs_no_counter() {
        let (state, negotiation) = fixtures::market();
        let action = TradeAction::swap("NYJ", "BUF", "j_wr1", "b_pick");
        assert!(matches!(
            counter_offer(&state, &action, &negotiation),
            Err(LeagueError::NoFeasibleCounter { .. })
        ));
    }

    #[test]
    fn test_giver_cannot_afford_sweetener() {
        let (state, _) = fixtures::market();
        // MIA values draft capital so highly that paying NYJ's gap sinks it.
        let negotiation = Negotiation::new([
            Agent::new("BUF", TeamPersona::CONTENDER),
            Agent::new("MIA", TeamPersona::new(0.5, 0.3, 2.0).unwrap()),
            Agent::new("NYJ", TeamPersona::REBUILDER),
        ]);
        let action = TradeAction::swap("MIA", "NYJ", "m_wr", "j_wr1");
        let err = counter_offer(&state, &action, &negotiation).unwrap_err();
        assert!(err.to_string().contains("worse off"));
    }

    #[test]
    fn test_illegal_proposal_propagates() {
        let (state, negotiation) = fixtures::market();
        let action = TradeAction::swap("MIA", "NYJ", "j_wr1", "m_wr");
        assert!(matches!(
            counter_offer(&state, &action, &negotiation),
            Err(LeagueError::IllegalAction(_))
        ));
    }
}
