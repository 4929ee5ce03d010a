//! Small canned leagues shared by the test suites.
//!
//! Enabled for this crate's own tests and, through the `fixtures` feature,
//! for downstream crates.

use crate::admissibility::Negotiation;
use crate::agent::{Agent, TeamPersona};
use crate::asset::{Asset, AssetKind};
use crate::rules::{LeagueRules, Turn, TurnOrder};
use crate::state::LeagueState;
use crate::team::TeamState;

/// Derive roster value and draft capital from the assets each team owns.
fn build(
    mut teams: Vec<TeamState>,
    assets: Vec<Asset>,
    rules: LeagueRules,
    turn: Turn,
) -> LeagueState {
    for team in &mut teams {
        for asset in assets.iter().filter(|a| a.team == team.id) {
            match asset.kind {
                AssetKind::Player => team.roster_value += asset.value,
                AssetKind::DraftPick => team.draft_capital += asset.value,
            }
        }
    }
    LeagueState::new(teams, assets, rules, turn).expect("fixture league is consistent")
}

/// Three-team market with BUF as the focal buyer.
///
/// | team | cap | needs   | assets                         | persona   |
/// |------|-----|---------|--------------------------------|-----------|
/// | BUF  | 10  | WR 0.9  | b_qb (QB 40M, 9.8), b_pick (3) | contender |
/// | NYJ  | 5   | RB 0.3  | j_wr1 (WR 12M, 7.5), j_rb (RB 4M, 3) | rebuilder |
/// | MIA  | 30  |         | m_wr (WR 20M, 8), m_te (TE 6M, 4) | balanced |
pub fn market_league_with_rules(rules: LeagueRules) -> LeagueState {
    let teams = vec![
        TeamState::new("BUF", 10.0).with_need("WR", 0.9),
        TeamState::new("NYJ", 5.0).with_need("RB", 0.3),
        TeamState::new("MIA", 30.0),
    ];
    let assets = vec![
        Asset::player("b_qb", "Franchise QB", "BUF", "QB", 40.0, 9.8).with_risk(0.2),
        Asset::draft_pick("b_pick", "2026 Round 2", "BUF", 3.0),
        Asset::player("j_wr1", "Alpha WR", "NYJ", "WR", 12.0, 7.5).with_risk(0.4),
        Asset::player("j_rb", "Power RB", "NYJ", "RB", 4.0, 3.0),
        Asset::player("m_wr", "Veteran WR", "MIA", "WR", 20.0, 8.0).with_risk(0.5),
        Asset::player("m_te", "Move TE", "MIA", "TE", 6.0, 4.0),
    ];
    build(teams, assets, rules, Turn::new("BUF", TurnOrder::FocalOnly, 3))
}

pub fn market_league() -> LeagueState {
    market_league_with_rules(LeagueRules::default())
}

pub fn market_negotiation() -> Negotiation {
    Negotiation::new([
        Agent::new("BUF", TeamPersona::CONTENDER),
        Agent::new("NYJ", TeamPersona::REBUILDER),
        Agent::new("MIA", TeamPersona::BALANCED),
    ])
}

pub fn market() -> (LeagueState, Negotiation) {
    (market_league(), market_negotiation())
}

/// CLE has no cap room and nothing anyone wants; every trade it could
/// propose leaves one side worse off.
pub fn hopeless() -> (LeagueState, Negotiation) {
    let teams = vec![
        TeamState::new("CLE", 0.0),
        TeamState::new("PIT", 30.0),
        TeamState::new("BAL", 30.0),
    ];
    let assets = vec![
        Asset::player("c_k", "Kicker", "CLE", "K", 1.0, 0.5),
        Asset::player("p_edge", "Edge Rusher", "PIT", "EDGE", 30.0, 9.0),
        Asset::player("bal_lt", "Left Tackle", "BAL", "OT", 30.0, 9.0),
    ];
    let state = build(
        teams,
        assets,
        LeagueRules::default(),
        Turn::new("CLE", TurnOrder::FocalOnly, 3),
    );
    let negotiation = Negotiation::new([
        Agent::new("CLE", TeamPersona::BALANCED),
        Agent::new("PIT", TeamPersona::CONTENDER),
        Agent::new("BAL", TeamPersona::CONTENDER),
    ]);
    (state, negotiation)
}

/// Two balanced teams with receivers of near-equal value, for grading.
pub fn grading() -> (LeagueState, Negotiation) {
    let teams = vec![TeamState::new("KC", 20.0), TeamState::new("BUF", 15.0)];
    let assets = vec![
        Asset::player("kc_wr", "KC WR", "KC", "WR", 10.0, 6.0),
        Asset::player("kc_rb", "KC RB", "KC", "RB", 5.0, 4.0),
        Asset::player("kc_te", "KC TE", "KC", "TE", 5.0, 4.0),
        Asset::player("kc_lb", "KC LB", "KC", "LB", 5.0, 4.0),
        Asset::player("buf_wr", "BUF WR", "BUF", "WR", 10.0, 5.9),
        Asset::player("buf_cb", "BUF CB", "BUF", "CB", 3.0, 2.0),
    ];
    let state = build(
        teams,
        assets,
        LeagueRules::default(),
        Turn::new("KC", TurnOrder::FocalOnly, 3),
    );
    let negotiation = Negotiation::new([
        Agent::new("KC", TeamPersona::BALANCED),
        Agent::new("BUF", TeamPersona::BALANCED),
    ]);
    (state, negotiation)
}
