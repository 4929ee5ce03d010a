//! Ranks the teams best placed to absorb a given asset.

use serde::Serialize;

use crate::asset::{AssetId, TeamId};
use crate::error::{LeagueError, Result};
use crate::state::LeagueState;

const NEED_WEIGHT: f64 = 0.6;
const SPACE_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerFit {
    pub team: TeamId,
    /// 0-100 composite of positional need and cap flexibility.
    pub score: f64,
    pub need_score: f64,
    pub space_score: f64,
    pub reason: String,
}

/// Teams other than the owner that can fit the asset's cap hit, ranked by
/// need at its position and relative cap space.
pub fn find_partners(state: &LeagueState, asset_id: &AssetId) -> Result<Vec<PartnerFit>> {
    let asset = state
        .asset(asset_id)
        .ok_or_else(|| LeagueError::UnknownAsset(asset_id.clone()))?;
    let owner = state.owner_of(asset_id);
    let max_space = state
        .teams()
        .map(|t| t.cap_space)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut fits: Vec<PartnerFit> = state
        .teams()
        .filter(|team| Some(&team.id) != owner)
        .filter(|team| team.cap_space >= asset.cap_hit && team.cap_space > 0.0)
        .map(|team| {
            let need_score = team.need(&asset.position) * 100.0;
            let space_score = if max_space > 0.0 {
                team.cap_space / max_space * 100.0
            } else {
                0.0
            };
            PartnerFit {
                team: team.id.clone(),
                score: NEED_WEIGHT * need_score + SPACE_WEIGHT * space_score,
                need_score,
                space_score,
                reason: format!(
                    "Cap Space: ${:.1}M | Need: {}/100",
                    team.cap_space,
                    need_score.round() as i64
                ),
            }
        })
        .collect();
    fits.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(fits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_partners_ranked_by_need_and_space() {
        let state = fixtures::market_league();
        // m_wr: WR, 20M cap hit owned by MIA. Only teams with >= 20M qualify.
        let fits = find_partners(&state, &AssetId::from("m_wr")).unwrap();
        assert!(fits.iter().all(|f| f.team != TeamId::from("MIA")));
        assert!(fits.is_empty());

        // j_rb: RB, 4M owned by NYJ. BUF (10M, WR need) and MIA (30M) qualify.
        let fits = find_partners(&state, &AssetId::from("j_rb")).unwrap();
        let teams: Vec<&str> = fits.iter().map(|f| f.team.as_str()).collect();
        assert_eq!(teams, vec!["MIA", "BUF"]);
        assert!((fits[0].space_score - 100.0).abs() < 1e-9);
        assert!((fits[0].score - 40.0).abs() < 1e-9);
        assert_eq!(fits[0].reason, "Cap Space: $30.0M | Need: 0/100");
    }

    #[test]
    fn test_cap_hit_must_fit() {
        let state = fixtures::market_league();
        // j_wr1: WR, 12M. MIA qualifies; BUF (10M) cannot fit it.
        let fits = find_partners(&state, &AssetId::from("j_wr1")).unwrap();
        assert_eq!(fits.len(), 1);
        assert_eq!(fits[0].team, TeamId::from("MIA"));

        // b_pick carries no cap hit: NYJ and MIA both qualify.
        let fits = find_partners(&state, &AssetId::from("b_pick")).unwrap();
        assert_eq!(fits.len(), 2);
    }

    #[test]
    fn test_unknown_asset() {
        let state = fixtures::market_league();
        assert!(matches!(
            find_partners(&state, &AssetId::from("ghost")),
            Err(LeagueError::UnknownAsset(_))
        ));
    }
}
