//! Betting-market analysis of a proposal.

use axum::{extract::State, Json};
use league_core::WinModel;
use std::sync::Arc;
use tracing::info;

use super::{rejection, ApiError};
use crate::types::{TradeRequest, WinImpactResponse};
use crate::AppState;

/// Projected win shift, spread and title-odds move for both teams.
/// Unlike grading, one side may send nothing.
pub async fn analyze_vegas(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TradeRequest>,
) -> Result<Json<WinImpactResponse>, ApiError> {
    let action = req.to_action();
    let impact = WinModel::default()
        .trade_impact(&state.league.state, &action)
        .map_err(rejection)?;
    info!(action = %action, "Analyzed win impact");
    Ok(Json(WinImpactResponse(impact)))
}
