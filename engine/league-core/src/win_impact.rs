//! Betting-market view of a trade: projected win shift and spread per side.
//!
//! A linear heuristic, independent of personas and utilities. Player surplus
//! is scaled by a positional weight and converted to wins; risk widens the
//! spread. Draft picks carry no on-field value this season and are skipped.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::action::TradeAction;
use crate::asset::{Asset, AssetId, TeamId};
use crate::error::{IllegalAction, LeagueError, Result};
use crate::state::LeagueState;

/// Positional multipliers on surplus value. Unlisted positions weigh 1.
const POSITION_WEIGHTS: &[(&str, f64)] = &[
    ("QB", 10.0),
    ("EDGE", 3.0),
    ("DE", 3.0),
    ("OT", 3.0),
    ("LT", 3.0),
    ("RT", 3.0),
    ("WR", 2.0),
    ("CB", 2.0),
    ("DT", 1.5),
    ("S", 1.5),
];

pub fn position_weight(position: &str) -> f64 {
    POSITION_WEIGHTS
        .iter()
        .find(|(p, _)| p.eq_ignore_ascii_case(position))
        .map_or(1.0, |(_, w)| *w)
}

/// Constants of the win model.
#[derive(Debug, Clone, PartialEq)]
pub struct WinModel {
    pub baseline_wins: f64,
    pub season_games: f64,
    /// Weighted surplus worth one win.
    pub surplus_per_win: f64,
    /// Percent change in title odds per projected win.
    pub odds_per_win: f64,
    /// z-score of the reported ceiling/floor band.
    pub confidence_z: f64,
    pub min_spread: f64,
}

impl Default for WinModel {
    fn default() -> Self {
        Self {
            baseline_wins: 8.5,
            season_games: 17.0,
            surplus_per_win: 50.0,
            odds_per_win: 15.0,
            confidence_z: 1.96,
            min_spread: 0.5,
        }
    }
}

/// Wins and risk carried by one side's package.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PackageImpact {
    pub wins: f64,
    pub sigma: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinImpact {
    pub delta_wins: f64,
    pub new_win_total: f64,
    /// Half-width of the confidence band, in wins.
    pub vegas_variance: f64,
    pub ceiling: f64,
    pub floor: f64,
    pub super_bowl_odds_delta: String,
}

impl WinModel {
    pub fn package<'a>(&self, assets: impl IntoIterator<Item = &'a Asset>) -> PackageImpact {
        let (weighted, risk) = assets
            .into_iter()
            .filter(|asset| !asset.is_pick())
            .fold((0.0, 0.0), |(weighted, risk), asset| {
                let surplus = asset.value * position_weight(&asset.position);
                (weighted + surplus, risk + asset.risk_score * surplus.abs())
            });
        PackageImpact {
            wins: weighted / self.surplus_per_win,
            sigma: risk / self.surplus_per_win,
        }
    }

    /// One side's view: it gains `incoming` and loses `outgoing`.
    pub fn side(&self, incoming: PackageImpact, outgoing: PackageImpact) -> WinImpact {
        let delta = incoming.wins - outgoing.wins;
        let sigma = incoming.sigma.hypot(outgoing.sigma);
        let total = (self.baseline_wins + delta).clamp(0.0, self.season_games);
        let spread = (self.confidence_z * sigma).max(self.min_spread);
        WinImpact {
            delta_wins: delta,
            new_win_total: total,
            vegas_variance: spread,
            ceiling: total + spread,
            floor: total - spread,
            super_bowl_odds_delta: self.odds_shift(delta),
        }
    }

    fn odds_shift(&self, delta_wins: f64) -> String {
        if delta_wins.abs() < f64::EPSILON {
            return "0%".to_string();
        }
        format!("{:+.1}%", delta_wins * self.odds_per_win)
    }

    /// Win impact for both parties of `action`. Either side may send nothing;
    /// cash and sweeteners do not play.
    pub fn trade_impact(
        &self,
        state: &LeagueState,
        action: &TradeAction,
    ) -> Result<BTreeMap<TeamId, WinImpact>> {
        let (source, target) = (&action.source, &action.target);
        if source == target {
            return Err(IllegalAction::SelfTrade(source.clone()).into());
        }
        for team in [source, target] {
            if state.team(team).is_none() {
                return Err(LeagueError::UnknownTeam(team.clone()));
            }
        }
        let sent = self.package(owned(state, source, &action.assets)?);
        let received = self.package(owned(state, target, &action.compensation.assets)?);
        debug!(
            %source,
            %target,
            sent_wins = sent.wins,
            received_wins = received.wins,
            "Win impact"
        );

        Ok(BTreeMap::from([
            (source.clone(), self.side(received, sent)),
            (target.clone(), self.side(sent, received)),
        ]))
    }
}

fn owned<'a>(state: &'a LeagueState, team: &TeamId, ids: &[AssetId]) -> Result<Vec<&'a Asset>> {
    ids.iter()
        .map(|id| -> Result<&'a Asset> {
            let asset = state
                .asset(id)
                .ok_or_else(|| LeagueError::UnknownAsset(id.clone()))?;
            if state.owner_of(id) != Some(team) {
                return Err(IllegalAction::NotOwned {
                    asset: id.clone(),
                    team: team.clone(),
                }
                .into());
            }
            Ok(asset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Compensation;
    use crate::fixtures;
    use crate::rules::{LeagueRules, Turn, TurnOrder};
    use crate::team::TeamState;

    fn league(assets: Vec<Asset>) -> LeagueState {
        let teams = ["NYJ", "GB", "IND", "TEN"]
            .into_iter()
            .map(|id| TeamState::new(id, 20.0))
            .collect();
        LeagueState::new(
            teams,
            assets,
            LeagueRules::default(),
            Turn::new("NYJ", TurnOrder::FocalOnly, 1),
        )
        .unwrap()
    }

    #[test]
    fn test_quarterback_moves_the_line() {
        let state = league(vec![
            Asset::player("gb_qb", "QB", "GB", "QB", 30.0, 20.0).with_risk(0.1)
        ]);
        let action = TradeAction::new(
            "NYJ",
            "GB",
            Vec::new(),
            Compensation::assets(vec!["gb_qb".into()]),
        );

        let impact = WinModel::default().trade_impact(&state, &action).unwrap();
        let jets = &impact[&TeamId::from("NYJ")];
        // 20 surplus x 10 weight / 50 = 4 wins.
        assert!((jets.delta_wins - 4.0).abs() < 1e-9);
        assert!((jets.new_win_total - 12.5).abs() < 1e-9);
        assert_eq!(jets.super_bowl_odds_delta, "+60.0%");

        let packers = &impact[&TeamId::from("GB")];
        assert!((packers.delta_wins + 4.0).abs() < 1e-9);
        assert!((packers.new_win_total - 4.5).abs() < 1e-9);
        assert_eq!(packers.super_bowl_odds_delta, "-60.0%");
    }

    #[test]
    fn test_risk_widens_spread() {
        let model = WinModel::default();
        let risky = Asset::player("wr", "WR", "KC", "WR", 10.0, 10.0).with_risk(0.9);
        let incoming = model.package([&risky]);
        assert!((incoming.wins - 0.4).abs() < 1e-9);
        // 20 weighted x 0.9 risk / 50.
        assert!((incoming.sigma - 0.36).abs() < 1e-9);

        let side = model.side(incoming, PackageImpact::default());
        assert!(side.vegas_variance > 0.5);
        assert!((side.vegas_variance - 1.96 * 0.36).abs() < 1e-9);
        assert!((side.ceiling - side.floor - 2.0 * side.vegas_variance).abs() < 1e-9);

        let safe = model.side(PackageImpact::default(), PackageImpact::default());
        assert!((safe.vegas_variance - 0.5).abs() < 1e-9);
        assert_eq!(safe.super_bowl_odds_delta, "0%");
    }

    #[test]
    fn test_matched_packages_cancel() {
        let state = league(vec![
            Asset::player("ind_g", "Guard", "IND", "OL", 8.0, 5.0).with_risk(0.1),
            Asset::player("ten_g", "Guard", "TEN", "OL", 8.0, 5.0).with_risk(0.1),
        ]);
        let action = TradeAction::swap("IND", "TEN", "ind_g", "ten_g");
        let impact = WinModel::default().trade_impact(&state, &action).unwrap();
        for side in impact.values() {
            assert_eq!(side.delta_wins, 0.0);
            assert!((side.new_win_total - 8.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_picks_and_totals_are_bounded() {
        let model = WinModel::default();
        let pick = Asset::draft_pick("p", "Round 1", "GB", 9.0);
        assert_eq!(model.package([&pick]), PackageImpact::default());

        let superstar = Asset::player("qb", "QB", "GB", "qb", 40.0, 60.0);
        let side = model.side(model.package([&superstar]), PackageImpact::default());
        assert!((side.new_win_total - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_market_swap() {
        let state = fixtures::market_league();
        // j_wr1 (WR 7.5) for b_pick: BUF gains 0.3 wins, the pick is worth none.
        let action = TradeAction::swap("NYJ", "BUF", "j_wr1", "b_pick");
        let impact = WinModel::default().trade_impact(&state, &action).unwrap();
        assert!((impact[&TeamId::from("BUF")].delta_wins - 0.3).abs() < 1e-9);
        assert!((impact[&TeamId::from("NYJ")].delta_wins + 0.3).abs() < 1e-9);
        assert_eq!(impact[&TeamId::from("BUF")].super_bowl_odds_delta, "+4.5%");
    }

    #[test]
    fn test_rejects_unknown_and_unowned_assets() {
        let state = fixtures::market_league();
        let model = WinModel::default();

        let ghost = TradeAction::swap("NYJ", "BUF", "ghost", "b_pick");
        assert!(matches!(
            model.trade_impact(&state, &ghost),
            Err(LeagueError::UnknownAsset(_))
        ));

        let stolen = TradeAction::swap("NYJ", "BUF", "m_wr", "b_pick");
        assert!(matches!(
            model.trade_impact(&state, &stolen),
            Err(LeagueError::IllegalAction(IllegalAction::NotOwned { .. }))
        ));

        let stranger = TradeAction::swap("NYJ", "KC", "j_wr1", "b_pick");
        assert!(matches!(
            model.trade_impact(&state, &stranger),
            Err(LeagueError::UnknownTeam(_))
        ));
    }
}
