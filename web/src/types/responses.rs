//! Response types for the trade API.

use std::collections::BTreeMap;

use league_core::{
    Agent, CounterOffer, PartnerFit, ScanResult, TeamId, TeamPersona, TeamState, TradeAction,
    Verdict, WinImpact,
};
use mcts::SearchResult;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// One team's books and the persona it negotiates with.
#[derive(Serialize)]
pub struct TeamSummary {
    pub id: String,
    pub cap_space: f64,
    pub roster_value: f64,
    pub draft_capital: f64,
    pub assets: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_need: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<TeamPersona>,
}

impl TeamSummary {
    pub fn new(team: &TeamState, agent: Option<&Agent>) -> Self {
        Self {
            id: team.id.to_string(),
            cap_space: team.cap_space,
            roster_value: team.roster_value,
            draft_capital: team.draft_capital,
            assets: team.assets.len(),
            top_need: team.top_need().map(|(position, _)| position.to_string()),
            persona: agent.map(|a| a.persona),
        }
    }
}

#[derive(Serialize)]
pub struct LeagueResponse {
    pub teams: Vec<TeamSummary>,
}

/// Grade of a proposal, with a counter-offer when one side rejects and a
/// sweetener can close the gap.
#[derive(Serialize)]
pub struct EvaluateResponse {
    #[serde(flatten)]
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_offer: Option<CounterOffer>,
}

/// Outcome of a trade search.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResponse {
    Found {
        focal_team: String,
        action: TradeAction,
        description: String,
        expected_reward: f64,
        baseline: f64,
        improvement: f64,
        visits: u32,
        iterations: u32,
        tree_nodes: usize,
    },
    NoTradeFound {
        focal_team: String,
    },
}

impl From<SearchResult> for SearchResponse {
    fn from(result: SearchResult) -> Self {
        SearchResponse::Found {
            focal_team: result.focal.to_string(),
            description: result.action.to_string(),
            improvement: result.improvement(),
            expected_reward: result.expected_reward,
            baseline: result.baseline,
            visits: result.visits,
            iterations: result.iterations,
            tree_nodes: result.tree.total_nodes,
            action: result.action,
        }
    }
}

#[derive(Serialize)]
pub struct ScanResponse {
    pub trades: Vec<ScanResult>,
}

#[derive(Serialize)]
pub struct PartnersResponse {
    pub asset_id: String,
    pub partners: Vec<PartnerFit>,
}

/// Win impact keyed by team abbreviation.
#[derive(Serialize)]
#[serde(transparent)]
pub struct WinImpactResponse(pub BTreeMap<TeamId, WinImpact>);
