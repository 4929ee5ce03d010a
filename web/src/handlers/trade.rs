//! Trade grading, negotiation and search handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use league_core::{
    counter_offer, find_partners, grade, scan_league, AssetId, CounterOffer, Grade, LeagueError,
    TeamId,
};
use mcts::{run_search, SearchError};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{rejection, ApiError};
use crate::metrics;
use crate::types::{
    EvaluateResponse, PartnersResponse, ScanQuery, ScanResponse, SearchRequest, SearchResponse,
    TradeRequest,
};
use crate::AppState;

/// Grade a proposal. A `C` (exactly one side worse off) carries a
/// counter-offer when a sweetener can bring the losing side back to even.
pub async fn evaluate_trade(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TradeRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let league = &state.league;
    let action = req.to_action();
    let verdict = grade(&league.state, &action, &league.negotiation, &league.grading);

    // D covers lopsided counts and two losers; a sweetener fixes neither.
    let counter = if verdict.grade == Grade::C {
        match counter_offer(&league.state, &action, &league.negotiation) {
            Ok(offer) => Some(offer),
            Err(e) if e.is_recoverable() => {
                debug!(error = %e, "No counter-offer for rejected proposal");
                None
            }
            Err(e) => return Err(rejection(e)),
        }
    } else {
        None
    };

    metrics::EVALUATIONS
        .with_label_values(&[&verdict.status.to_string()])
        .inc();
    info!(
        action = %action,
        grade = %verdict.grade,
        status = %verdict.status,
        counter_offer = counter.is_some(),
        "Graded proposal"
    );
    Ok(Json(EvaluateResponse {
        verdict,
        counter_offer: counter,
    }))
}

/// Build the sweetener that closes the rejecting side's gap, or 422.
pub async fn counter_trade(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TradeRequest>,
) -> Result<Json<CounterOffer>, ApiError> {
    let league = &state.league;
    match counter_offer(&league.state, &req.to_action(), &league.negotiation) {
        Ok(offer) => {
            metrics::COUNTER_OFFERS.with_label_values(&["built"]).inc();
            Ok(Json(offer))
        }
        Err(e) => {
            metrics::COUNTER_OFFERS
                .with_label_values(&["infeasible"])
                .inc();
            Err(rejection(e))
        }
    }
}

/// Run MCTS for one focal team on the blocking pool.
pub async fn search_trade(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let focal = TeamId::from(req.focal_team);
    if state.league.state.team(&focal).is_none() {
        return Err(rejection(LeagueError::UnknownTeam(focal)));
    }

    let mut config = state.league.search.clone();
    if let Some(iterations) = req.iterations {
        config = config.with_iterations(iterations);
    }
    if config.iterations > state.max_search_iterations {
        warn!(
            requested = config.iterations,
            max = state.max_search_iterations,
            "Clamping search iterations"
        );
        config = config.with_iterations(state.max_search_iterations);
    }
    if let Some(seed) = req.seed {
        config = config.with_seed(seed);
    }

    let league = Arc::clone(&state.league);
    let timer = metrics::SEARCH_SECONDS.start_timer();
    let outcome = tokio::task::spawn_blocking(move || {
        run_search(&league.state, &focal, &league.negotiation, config)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Search task failed: {}", e),
        )
    })?;
    timer.observe_duration();

    match outcome {
        Ok(result) => {
            metrics::SEARCHES.with_label_values(&["found"]).inc();
            Ok(Json(result.into()))
        }
        Err(SearchError::NoTradeFound(team)) => {
            metrics::SEARCHES
                .with_label_values(&["no_trade_found"])
                .inc();
            info!(focal = %team, "Search found no admissible trade");
            Ok(Json(SearchResponse::NoTradeFound {
                focal_team: team.to_string(),
            }))
        }
        Err(e) => {
            metrics::SEARCHES.with_label_values(&["error"]).inc();
            Err(match e {
                SearchError::League(e) => rejection(e),
                SearchError::InvalidConfig(msg) => (StatusCode::BAD_REQUEST, msg),
                other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            })
        }
    }
}

/// Mutually beneficial one-step trades across the league.
pub async fn scan_trades(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanQuery>,
) -> Result<Json<ScanResponse>, ApiError> {
    let league = &state.league;
    let trades = scan_league(&league.state, &league.negotiation, query.limit).map_err(rejection)?;
    Ok(Json(ScanResponse { trades }))
}

/// Teams best placed to take on an asset.
pub async fn find_partner(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
) -> Result<Json<PartnersResponse>, ApiError> {
    let partners =
        find_partners(&state.league.state, &AssetId::from(asset_id.as_str())).map_err(rejection)?;
    Ok(Json(PartnersResponse { asset_id, partners }))
}
