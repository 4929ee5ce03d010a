//! League overview.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::types::{LeagueResponse, TeamSummary};
use crate::AppState;

/// Every team in the loaded snapshot with its persona.
pub async fn get_league(State(state): State<Arc<AppState>>) -> Json<LeagueResponse> {
    let league = &state.league;
    let teams = league
        .state
        .teams()
        .map(|team| TeamSummary::new(team, league.negotiation.agent(&team.id).ok()))
        .collect();
    Json(LeagueResponse { teams })
}
