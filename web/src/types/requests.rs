//! Request types for the trade API.

use league_core::{AssetId, Compensation, TradeAction};
use serde::Deserialize;

/// An asset named either by bare id or by a record carrying an `id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AssetRef {
    Id(String),
    Record { id: String },
}

impl AssetRef {
    pub fn id(&self) -> AssetId {
        match self {
            AssetRef::Id(id) | AssetRef::Record { id } => AssetId::new(id.as_str()),
        }
    }
}

/// A proposal between two teams. `team_a` sends `team_a_assets` to
/// `team_b`, which sends back `team_b_assets` plus `cash`.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRequest {
    pub team_a: String,
    pub team_b: String,
    #[serde(default)]
    pub team_a_assets: Vec<AssetRef>,
    #[serde(default)]
    pub team_b_assets: Vec<AssetRef>,
    /// Cap-equivalent millions paid by `team_b`.
    #[serde(default)]
    pub cash: f64,
}

impl TradeRequest {
    pub fn to_action(&self) -> TradeAction {
        TradeAction::new(
            self.team_a.as_str(),
            self.team_b.as_str(),
            self.team_a_assets.iter().map(AssetRef::id).collect(),
            Compensation {
                assets: self.team_b_assets.iter().map(AssetRef::id).collect(),
                cash: self.cash,
            },
        )
    }
}

/// Request to search for the best trade sequence opener for one team.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub focal_team: String,
    /// Overrides `search.iterations` from config.
    #[serde(default)]
    pub iterations: Option<u32>,
    /// Overrides `search.seed` from config.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    #[serde(default = "default_scan_limit")]
    pub limit: usize,
}

fn default_scan_limit() -> usize {
    10
}
