//! League-wide scan for mutually beneficial single trades.

use serde::Serialize;
use tracing::info;

use crate::action::TradeAction;
use crate::admissibility::{Negotiation, DELTA_TOLERANCE};
use crate::asset::TeamId;
use crate::error::Result;
use crate::state::LeagueState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub buyer: TeamId,
    pub seller: TeamId,
    pub action: TradeAction,
    pub buyer_gain: f64,
    pub seller_gain: f64,
    pub combined_gain: f64,
}

/// Every team shops from the current state. Trades that strictly help both
/// parties are ranked by combined gain; the best `limit` are returned.
pub fn scan_league(
    state: &LeagueState,
    negotiation: &Negotiation,
    limit: usize,
) -> Result<Vec<ScanResult>> {
    let mut results = Vec::new();
    for buyer in state.team_ids() {
        for candidate in negotiation.admissible_actions(state, buyer)? {
            let buyer_gain = candidate.appraisal.target_delta;
            let seller_gain = candidate.appraisal.source_delta;
            if buyer_gain <= DELTA_TOLERANCE || seller_gain <= DELTA_TOLERANCE {
                continue;
            }
            results.push(ScanResult {
                buyer: candidate.action.target.clone(),
                seller: candidate.action.source.clone(),
                action: candidate.action,
                buyer_gain,
                seller_gain,
                combined_gain: buyer_gain + seller_gain,
            });
        }
    }
    let found = results.len();
    // Stable sort keeps enumeration order among equal gains.
    results.sort_by(|a, b| b.combined_gain.total_cmp(&a.combined_gain));
    results.truncate(limit);
    info!(found, returned = results.len(), "League scan complete");
    Ok(results)
}
