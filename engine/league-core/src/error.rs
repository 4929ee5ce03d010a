//! Error types for the league model.

use crate::asset::{AssetId, TeamId};
use std::path::PathBuf;
use thiserror::Error;

/// A trade that cannot be applied to the state it was proposed against.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IllegalAction {
    #[error("unknown team {0}")]
    UnknownTeam(TeamId),

    #[error("unknown asset {0}")]
    UnknownAsset(AssetId),

    #[error("asset {asset} is not owned by {team}")]
    NotOwned { asset: AssetId, team: TeamId },

    #[error("asset {0} is not on the market")]
    Untradeable(AssetId),

    #[error("asset {0} appears more than once in the trade")]
    DuplicateAsset(AssetId),

    #[error("{0} cannot trade with itself")]
    SelfTrade(TeamId),

    #[error("cash offset must be non-negative, got {0}")]
    NegativeCash(f64),

    #[error("sweetener giver {0} is not a party to the trade")]
    SweetenerGiver(TeamId),

    #[error("sweetener id {0} is already in use")]
    SweetenerCollision(AssetId),

    #[error("{team} would drop to {cap_space:.2}M cap space, below the {floor:.2}M floor")]
    CapFloorBreached {
        team: TeamId,
        cap_space: f64,
        floor: f64,
    },
}

/// Errors surfaced by league operations.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("Illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),

    #[error("No feasible counter-offer for {team}: {reason}")]
    NoFeasibleCounter { team: TeamId, reason: String },

    #[error("Unknown team: {0}")]
    UnknownTeam(TeamId),

    #[error("Unknown asset: {0}")]
    UnknownAsset(AssetId),

    #[error("Invalid persona: {0}")]
    InvalidPersona(String),

    #[error("Invalid rules: {0}")]
    InvalidRules(String),

    /// The input violates an ownership invariant. Not recoverable.
    #[error("Corrupted league state: {0}")]
    CorruptedState(String),

    #[error("Failed to read snapshot {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),
}

impl LeagueError {
    /// Whether a request boundary may answer with a structured rejection.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LeagueError::CorruptedState(_))
    }
}

pub type Result<T, E = LeagueError> = std::result::Result<T, E>;
