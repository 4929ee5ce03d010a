//! HTTP request handlers.

mod analysis;
mod health;
mod league;
mod trade;

pub use analysis::*;
pub use health::*;
pub use league::*;
pub use trade::*;

use axum::http::StatusCode;
use league_core::LeagueError;
use tracing::{error, warn};

/// Handler error: status plus a plain-text reason.
pub type ApiError = (StatusCode, String);

/// Map a league error onto a structured rejection. Only corrupted state is
/// treated as a server fault.
pub(crate) fn rejection(err: LeagueError) -> ApiError {
    if !err.is_recoverable() {
        error!(error = %err, "League state is corrupted");
        return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
    }
    let status = match &err {
        LeagueError::UnknownTeam(_) | LeagueError::UnknownAsset(_) => StatusCode::NOT_FOUND,
        LeagueError::NoFeasibleCounter { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_REQUEST,
    };
    warn!(error = %err, status = status.as_u16(), "Rejected request");
    (status, err.to_string())
}
