//! Immutable league snapshot and the trade transition function.
//!
//! A [`LeagueState`] is never mutated. [`LeagueState::apply`] produces a new
//! state that shares the asset registry and rules with its parent through
//! `Arc`, so states are cheap to clone and safe to share across threads.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::trace;

use crate::action::TradeAction;
use crate::asset::{Asset, AssetId, AssetKind, TeamId};
use crate::error::{IllegalAction, LeagueError, Result};
use crate::rules::{LeagueRules, Turn, TurnOrder};
use crate::team::TeamState;

/// All teams, the assets they own, and whose turn it is.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueState {
    teams: BTreeMap<TeamId, TeamState>,
    registry: Arc<BTreeMap<AssetId, Asset>>,
    rules: Arc<LeagueRules>,
    turn: Turn,
}

impl LeagueState {
    /// Build a state from team books and the asset registry.
    ///
    /// Each asset is assigned to the team named in its `team` field. Duplicate
    /// ids or assets owned by unknown teams are a corrupted input.
    pub fn new(
        teams: Vec<TeamState>,
        assets: Vec<Asset>,
        rules: LeagueRules,
        turn: Turn,
    ) -> Result<Self> {
        rules.validate()?;
        let mut by_id = BTreeMap::new();
        for team in teams {
            let id = team.id.clone();
            if by_id.insert(id.clone(), team).is_some() {
                return Err(LeagueError::CorruptedState(format!("duplicate team {id}")));
            }
        }

        let mut registry = BTreeMap::new();
        for asset in assets {
            let owner = by_id.get_mut(&asset.team).ok_or_else(|| {
                LeagueError::CorruptedState(format!(
                    "asset {} is owned by unknown team {}",
                    asset.id, asset.team
                ))
            })?;
            owner.assets.insert(asset.id.clone());
            let id = asset.id.clone();
            if registry.insert(id.clone(), asset).is_some() {
                return Err(LeagueError::CorruptedState(format!("duplicate asset {id}")));
            }
        }

        if !by_id.contains_key(&turn.focal) {
            return Err(LeagueError::UnknownTeam(turn.focal.clone()));
        }
        if !by_id.contains_key(&turn.active) {
            return Err(LeagueError::UnknownTeam(turn.active.clone()));
        }

        let state = Self {
            teams: by_id,
            registry: Arc::new(registry),
            rules: Arc::new(rules),
            turn,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check the ownership invariant: every registered asset is owned by
    /// exactly one team and teams own nothing outside the registry.
    pub fn validate(&self) -> Result<()> {
        let mut seen: BTreeSet<&AssetId> = BTreeSet::new();
        for team in self.teams.values() {
            for id in &team.assets {
                if !self.registry.contains_key(id) {
                    return Err(LeagueError::CorruptedState(format!(
                        "{} owns unregistered asset {id}",
                        team.id
                    )));
                }
                if !seen.insert(id) {
                    return Err(LeagueError::CorruptedState(format!(
                        "asset {id} is owned by more than one team"
                    )));
                }
            }
        }
        if seen.len() != self.registry.len() {
            let orphan = self
                .registry
                .keys()
                .find(|id| !seen.contains(id))
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(LeagueError::CorruptedState(format!(
                "asset {orphan} has no owner"
            )));
        }
        Ok(())
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamState> {
        self.teams.values()
    }

    pub fn team_ids(&self) -> impl Iterator<Item = &TeamId> {
        self.teams.keys()
    }

    pub fn team(&self, id: &TeamId) -> Option<&TeamState> {
        self.teams.get(id)
    }

    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.registry.get(id)
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.registry.values()
    }

    pub fn rules(&self) -> &LeagueRules {
        &self.rules
    }

    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    pub fn focal(&self) -> &TeamId {
        &self.turn.focal
    }

    pub fn active_team(&self) -> &TeamId {
        &self.turn.active
    }

    pub fn owner_of(&self, asset: &AssetId) -> Option<&TeamId> {
        self.teams
            .values()
            .find(|team| team.owns(asset))
            .map(|team| &team.id)
    }

    /// Assets flagged tradeable, in id order.
    pub fn market_pool(&self) -> impl Iterator<Item = &Asset> {
        self.registry.values().filter(|asset| asset.tradeable)
    }

    /// Assets `team` is prepared to give up, in id order.
    pub fn willing_assets(&self, team: &TeamId) -> Vec<&Asset> {
        let Some(team) = self.teams.get(team) else {
            return Vec::new();
        };
        team.assets
            .iter()
            .filter_map(|id| self.registry.get(id))
            .filter(|asset| self.rules.is_willing(asset))
            .collect()
    }

    /// Same teams and assets under different turn metadata.
    pub fn with_turn(&self, turn: Turn) -> Result<Self> {
        for team in [&turn.focal, &turn.active] {
            if !self.teams.contains_key(team) {
                return Err(LeagueError::UnknownTeam(team.clone()));
            }
        }
        Ok(Self {
            turn,
            ..self.clone()
        })
    }

    /// Restart the turn sequence with `focal` proposing first.
    pub fn with_focal(&self, focal: &TeamId) -> Result<Self> {
        self.with_turn(Turn::new(
            focal.clone(),
            self.turn.order,
            self.turn.max_depth,
        ))
    }

    /// No further trades: the depth budget is spent or nobody has a
    /// willing asset left.
    pub fn is_terminal(&self) -> bool {
        if self.turn.is_exhausted() {
            return true;
        }
        !self
            .teams
            .values()
            .any(|team| !self.willing_assets(&team.id).is_empty())
    }

    /// Every single-asset trade `buyer` could propose, ordered by seller id,
    /// then asset id, then compensation (ladder rungs before swaps).
    pub fn legal_actions(&self, buyer: &TeamId) -> Vec<TradeAction> {
        let Some(buyer_state) = self.teams.get(buyer) else {
            return Vec::new();
        };
        let focus = if self.rules.target_top_need {
            match buyer_state.top_need() {
                Some((position, _)) => Some(position),
                None => return Vec::new(),
            }
        } else {
            None
        };

        let own = self.willing_assets(buyer);
        let mut actions = Vec::new();
        for seller in self.teams.keys().filter(|id| *id != buyer) {
            for asset in self.willing_assets(seller) {
                if focus.is_some_and(|position| asset.position != position) {
                    continue;
                }
                for &cash in &self.rules.compensation_ladder {
                    actions.push(TradeAction::for_cash(
                        seller.clone(),
                        buyer.clone(),
                        asset.id.clone(),
                        cash,
                    ));
                }
                for returned in &own {
                    actions.push(TradeAction::swap(
                        seller.clone(),
                        buyer.clone(),
                        asset.id.clone(),
                        returned.id.clone(),
                    ));
                }
            }
        }
        actions
    }

    /// Apply a trade, producing a new state. `self` is left untouched.
    pub fn apply(&self, action: &TradeAction) -> std::result::Result<Self, IllegalAction> {
        let (source, target) = (&action.source, &action.target);
        if source == target {
            return Err(IllegalAction::SelfTrade(source.clone()));
        }
        for team in [source, target] {
            if !self.teams.contains_key(team) {
                return Err(IllegalAction::UnknownTeam(team.clone()));
            }
        }
        let cash = action.compensation.cash;
        if cash.is_nan() || cash < 0.0 {
            return Err(IllegalAction::NegativeCash(cash));
        }

        let mut moved = BTreeSet::new();
        let outgoing = action.assets.iter().map(|id| (id, source));
        let incoming = action.compensation.assets.iter().map(|id| (id, target));
        for (id, giver) in outgoing.chain(incoming) {
            if !moved.insert(id) {
                return Err(IllegalAction::DuplicateAsset(id.clone()));
            }
            let asset = self
                .registry
                .get(id)
                .ok_or_else(|| IllegalAction::UnknownAsset(id.clone()))?;
            if !self.teams[giver].owns(id) {
                return Err(IllegalAction::NotOwned {
                    asset: id.clone(),
                    team: giver.clone(),
                });
            }
            if !asset.tradeable {
                return Err(IllegalAction::Untradeable(id.clone()));
            }
        }
        if let Some(pick) = &action.sweetener {
            if !action.is_party(&pick.team) {
                return Err(IllegalAction::SweetenerGiver(pick.team.clone()));
            }
            if self.registry.contains_key(&pick.id) {
                return Err(IllegalAction::SweetenerCollision(pick.id.clone()));
            }
        }

        let mut teams = self.teams.clone();
        let decay = self.rules.need_decay;
        for id in &action.assets {
            transfer(&mut teams, &self.registry[id], source, target, decay);
        }
        for id in &action.compensation.assets {
            transfer(&mut teams, &self.registry[id], target, source, decay);
        }
        if let Some(team) = teams.get_mut(source) {
            team.cap_space += cash;
        }
        if let Some(team) = teams.get_mut(target) {
            team.cap_space -= cash;
        }

        let mut registry = Arc::clone(&self.registry);
        if let Some(pick) = &action.sweetener {
            let giver = &pick.team;
            let receiver = action.counterparty(giver).unwrap_or(target);
            credit(&mut teams, pick, giver, receiver);
            Arc::make_mut(&mut registry).insert(pick.id.clone(), pick.clone());
            if let Some(team) = teams.get_mut(receiver) {
                team.assets.insert(pick.id.clone());
            }
        }

        if let Some(floor) = self.rules.cap_floor {
            for team in [source, target] {
                let cap_space = teams[team].cap_space;
                if self.rules.breaches_floor(cap_space) {
                    return Err(IllegalAction::CapFloorBreached {
                        team: team.clone(),
                        cap_space,
                        floor,
                    });
                }
            }
        }

        let turn = self.next_turn();
        trace!(
            action = %action,
            depth = turn.depth,
            active = %turn.active,
            "Applied trade"
        );
        let next = Self {
            teams,
            registry,
            rules: Arc::clone(&self.rules),
            turn,
        };
        debug_assert!(next.validate().is_ok(), "apply broke ownership invariant");
        Ok(next)
    }

    fn next_turn(&self) -> Turn {
        let active = match self.turn.order {
            TurnOrder::FocalOnly => self.turn.focal.clone(),
            TurnOrder::RoundRobin => self
                .teams
                .range::<TeamId, _>((
                    std::ops::Bound::Excluded(&self.turn.active),
                    std::ops::Bound::Unbounded,
                ))
                .next()
                .or_else(|| self.teams.iter().next())
                .map(|(id, _)| id.clone())
                .unwrap_or_else(|| self.turn.active.clone()),
        };
        Turn {
            active,
            depth: self.turn.depth + 1,
            ..self.turn.clone()
        }
    }
}

/// Move one registered asset between teams, updating books and needs.
fn transfer(
    teams: &mut BTreeMap<TeamId, TeamState>,
    asset: &Asset,
    giver: &TeamId,
    receiver: &TeamId,
    decay: f64,
) {
    if let Some(team) = teams.get_mut(giver) {
        team.assets.remove(&asset.id);
        if let Some(position) = asset.need_position() {
            let need = team.needs.entry(position.to_string()).or_insert(0.0);
            *need = (*need + decay).min(1.0);
        }
    }
    if let Some(team) = teams.get_mut(receiver) {
        team.assets.insert(asset.id.clone());
        if let Some(position) = asset.need_position() {
            if let Some(need) = team.needs.get_mut(position) {
                *need = (*need - decay).max(0.0);
            }
        }
    }
    credit(teams, asset, giver, receiver);
}

/// Shift an asset's cap hit and value from `giver`'s books to `receiver`'s.
fn credit(
    teams: &mut BTreeMap<TeamId, TeamState>,
    asset: &Asset,
    giver: &TeamId,
    receiver: &TeamId,
) {
    for (team, sign) in [(giver, -1.0), (receiver, 1.0)] {
        let Some(team) = teams.get_mut(team) else {
            continue;
        };
        team.cap_space -= sign * asset.cap_hit;
        match asset.kind {
            AssetKind::Player => team.roster_value += sign * asset.value,
            AssetKind::DraftPick => team.draft_capital += sign * asset.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn id(s: &str) -> TeamId {
        TeamId::from(s)
    }

    fn aid(s: &str) -> AssetId {
        AssetId::from(s)
    }

    #[test]
    fn test_new_assigns_ownership() {
        let state = fixtures::market_league();
        assert_eq!(state.owner_of(&aid("j_wr1")), Some(&id("NYJ")));
        assert_eq!(state.owner_of(&aid("b_pick")), Some(&id("BUF")));
        assert_eq!(state.owner_of(&aid("nope")), None);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_duplicate_asset_is_corrupted() {
        let teams = vec![TeamState::new("BUF", 0.0), TeamState::new("NYJ", 0.0)];
        let assets = vec![
            Asset::player("x", "X", "BUF", "WR", 1.0, 1.0),
            Asset::player("x", "X", "NYJ", "WR", 1.0, 1.0),
        ];
        let err = LeagueState::new(
            teams,
            assets,
            LeagueRules::default(),
            Turn::new("BUF", TurnOrder::FocalOnly, 1),
        )
        .unwrap_err();
        assert!(matches!(err, LeagueError::CorruptedState(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_asset_of_unknown_team_is_corrupted() {
        let err = LeagueState::new(
            vec![TeamState::new("BUF", 0.0)],
            vec![Asset::player("x", "X", "KC", "WR", 1.0, 1.0)],
            LeagueRules::default(),
            Turn::new("BUF", TurnOrder::FocalOnly, 1),
        )
        .unwrap_err();
        assert!(matches!(err, LeagueError::CorruptedState(_)));
    }

    #[test]
    fn test_negative_ladder_rung_is_rejected_up_front() {
        // A negative rung would enumerate cash offers that `apply` refuses.
        let err = LeagueState::new(
            vec![TeamState::new("BUF", 0.0)],
            Vec::new(),
            LeagueRules::default().with_compensation_ladder(vec![-1.0, 0.0]),
            Turn::new("BUF", TurnOrder::FocalOnly, 1),
        )
        .unwrap_err();
        assert!(matches!(err, LeagueError::InvalidRules(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_double_ownership_is_corrupted() {
        let mut stray = TeamState::new("NYJ", 0.0);
        stray.assets.insert(aid("x"));
        let err = LeagueState::new(
            vec![TeamState::new("BUF", 0.0), stray],
            vec![Asset::player("x", "X", "BUF", "WR", 1.0, 1.0)],
            LeagueRules::default(),
            Turn::new("BUF", TurnOrder::FocalOnly, 1),
        )
        .unwrap_err();
        assert!(matches!(err, LeagueError::CorruptedState(_)));
    }

    #[test]
    fn test_unknown_focal_team() {
        let err = LeagueState::new(
            vec![TeamState::new("BUF", 0.0)],
            Vec::new(),
            LeagueRules::default(),
            Turn::new("KC", TurnOrder::FocalOnly, 1),
        )
        .unwrap_err();
        assert!(matches!(err, LeagueError::UnknownTeam(_)));
    }

    #[test]
    fn test_apply_cash_trade_updates_books() {
        let state = fixtures::market_league();
        let action = TradeAction::for_cash("NYJ", "BUF", "j_wr1", 2.5);
        let next = state.apply(&action).unwrap();

        let buf = next.team(&id("BUF")).unwrap();
        let nyj = next.team(&id("NYJ")).unwrap();
        // BUF absorbs the 12M cap hit and pays 2.5M.
        assert!((buf.cap_space - (10.0 - 12.0 - 2.5)).abs() < 1e-9);
        assert!((nyj.cap_space - (5.0 + 12.0 + 2.5)).abs() < 1e-9);
        assert!(buf.owns(&aid("j_wr1")));
        assert!(!nyj.owns(&aid("j_wr1")));
        assert!((buf.roster_value - (9.8 + 7.5)).abs() < 1e-9);
        assert!((nyj.roster_value - 3.0).abs() < 1e-9);
        // WR need decays for the receiver and grows for the giver.
        assert!((buf.need("WR") - 0.65).abs() < 1e-9);
        assert!((nyj.need("WR") - 0.25).abs() < 1e-9);
        assert_eq!(next.turn().depth, 1);

        // The original state is untouched.
        assert!(state.team(&id("NYJ")).unwrap().owns(&aid("j_wr1")));
        assert_eq!(state.turn().depth, 0);
    }

    #[test]
    fn test_apply_swap_moves_pick_into_draft_capital() {
        let state = fixtures::market_league();
        let next = state
            .apply(&TradeAction::swap("NYJ", "BUF", "j_wr1", "b_pick"))
            .unwrap();
        let buf = next.team(&id("BUF")).unwrap();
        let nyj = next.team(&id("NYJ")).unwrap();
        assert!((buf.draft_capital).abs() < 1e-9);
        assert!((nyj.draft_capital - 3.0).abs() < 1e-9);
        assert!(nyj.owns(&aid("b_pick")));
        // Picks carry no positional need.
        assert!(!buf.needs.contains_key("PICK"));
    }

    #[test]
    fn test_apply_rejects_foreign_asset() {
        let state = fixtures::market_league();
        let err = state
            .apply(&TradeAction::for_cash("NYJ", "BUF", "m_wr", 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            IllegalAction::NotOwned {
                asset: aid("m_wr"),
                team: id("NYJ")
            }
        );
    }

    #[test]
    fn test_apply_rejects_malformed_actions() {
        let state = fixtures::market_league();
        assert!(matches!(
            state.apply(&TradeAction::for_cash("BUF", "BUF", "b_pick", 0.0)),
            Err(IllegalAction::SelfTrade(_))
        ));
        assert!(matches!(
            state.apply(&TradeAction::for_cash("NYJ", "KC", "j_rb", 0.0)),
            Err(IllegalAction::UnknownTeam(_))
        ));
        assert!(matches!(
            state.apply(&TradeAction::for_cash("NYJ", "BUF", "ghost", 0.0)),
            Err(IllegalAction::UnknownAsset(_))
        ));
        assert!(matches!(
            state.apply(&TradeAction::for_cash("NYJ", "BUF", "j_rb", -1.0)),
            Err(IllegalAction::NegativeCash(_))
        ));
        let twice = TradeAction::new(
            "NYJ",
            "BUF",
            vec![aid("j_rb"), aid("j_rb")],
            Default::default(),
        );
        assert!(matches!(
            state.apply(&twice),
            Err(IllegalAction::DuplicateAsset(_))
        ));
    }

    #[test]
    fn test_apply_respects_cap_floor() {
        let state = fixtures::market_league_with_rules(LeagueRules::default().with_cap_floor(0.0));
        // BUF has 10M and would absorb a 12M cap hit.
        let err = state
            .apply(&TradeAction::for_cash("NYJ", "BUF", "j_wr1", 0.0))
            .unwrap_err();
        assert!(matches!(err, IllegalAction::CapFloorBreached { ref team, .. } if team == &id("BUF")));
        // A cheaper player fits.
        assert!(state
            .apply(&TradeAction::for_cash("NYJ", "BUF", "j_rb", 0.0))
            .is_ok());
    }

    #[test]
    fn test_apply_sweetener_creates_asset() {
        let state = fixtures::market_league();
        let pick = Asset::draft_pick("MIA_comp_1", "Comp", "MIA", 6.0);
        let action = TradeAction::swap("MIA", "NYJ", "m_wr", "j_wr1").with_sweetener(pick);
        let next = state.apply(&action).unwrap();
        assert_eq!(next.owner_of(&aid("MIA_comp_1")), Some(&id("NYJ")));
        assert!(state.asset(&aid("MIA_comp_1")).is_none());
        let mia = next.team(&id("MIA")).unwrap();
        assert!((mia.draft_capital + 6.0).abs() < 1e-9);
        assert!(next.validate().is_ok());

        let collision = TradeAction::swap("MIA", "NYJ", "m_wr", "j_wr1")
            .with_sweetener(Asset::draft_pick("b_pick", "Comp", "MIA", 1.0));
        assert!(matches!(
            state.apply(&collision),
            Err(IllegalAction::SweetenerCollision(_))
        ));
        let outsider = TradeAction::swap("MIA", "NYJ", "m_wr", "j_wr1")
            .with_sweetener(Asset::draft_pick("new", "Comp", "BUF", 1.0));
        assert!(matches!(
            state.apply(&outsider),
            Err(IllegalAction::SweetenerGiver(_))
        ));
    }

    #[test]
    fn test_round_robin_turns_wrap() {
        let state = fixtures::market_league();
        let state = state
            .with_turn(Turn {
                active: id("MIA"),
                ..Turn::new("BUF", TurnOrder::RoundRobin, 5)
            })
            .unwrap();
        let next = state
            .apply(&TradeAction::for_cash("BUF", "MIA", "b_pick", 0.0))
            .unwrap();
        assert_eq!(next.active_team(), &id("NYJ"));
        let next = next
            .apply(&TradeAction::for_cash("MIA", "NYJ", "m_te", 0.0))
            .unwrap();
        assert_eq!(next.active_team(), &id("BUF"));
    }

    #[test]
    fn test_focal_only_keeps_focal_active() {
        let state = fixtures::market_league();
        let next = state
            .apply(&TradeAction::for_cash("NYJ", "BUF", "j_rb", 0.0))
            .unwrap();
        assert_eq!(next.active_team(), &id("BUF"));
    }

    #[test]
    fn test_legal_actions_order_and_shape() {
        let state = fixtures::market_league();
        let actions = state.legal_actions(&id("BUF"));
        // Sellers MIA then NYJ, two willing assets each, four rungs plus one swap per asset.
        assert_eq!(actions.len(), 2 * 2 * 5);
        assert_eq!(actions[0], TradeAction::for_cash("MIA", "BUF", "m_te", 0.0));
        assert_eq!(actions[3], TradeAction::for_cash("MIA", "BUF", "m_te", 10.0));
        assert_eq!(actions[4], TradeAction::swap("MIA", "BUF", "m_te", "b_pick"));
        assert_eq!(actions[5], TradeAction::for_cash("MIA", "BUF", "m_wr", 0.0));
        assert!(actions.iter().all(|a| a.target == id("BUF")));
        // The untouchable quarterback is never offered.
        assert!(actions
            .iter()
            .all(|a| !a.compensation.assets.contains(&aid("b_qb"))));
        assert_eq!(actions, state.legal_actions(&id("BUF")));
    }

    #[test]
    fn test_legal_actions_target_top_need() {
        let state =
            fixtures::market_league_with_rules(LeagueRules::default().with_target_top_need(true));
        let actions = state.legal_actions(&id("BUF"));
        let targeted: BTreeSet<_> = actions.iter().map(|a| a.assets[0].clone()).collect();
        assert_eq!(targeted, BTreeSet::from([aid("j_wr1"), aid("m_wr")]));

        // MIA has no recorded needs.
        assert!(state.legal_actions(&id("MIA")).is_empty());
    }

    #[test]
    fn test_legal_actions_unknown_team_is_empty() {
        assert!(fixtures::market_league()
            .legal_actions(&id("KC"))
            .is_empty());
    }

    #[test]
    fn test_terminal_conditions() {
        let state = fixtures::market_league();
        assert!(!state.is_terminal());

        let exhausted = state
            .with_turn(Turn::new("BUF", TurnOrder::FocalOnly, 0))
            .unwrap();
        assert!(exhausted.is_terminal());

        let stars = LeagueState::new(
            vec![TeamState::new("BUF", 0.0), TeamState::new("KC", 0.0)],
            vec![
                Asset::player("a", "A", "BUF", "QB", 40.0, 9.9),
                Asset::player("b", "B", "KC", "QB", 1.0, 1.0).untradeable(),
            ],
            LeagueRules::default(),
            Turn::new("BUF", TurnOrder::FocalOnly, 3),
        )
        .unwrap();
        assert!(stars.is_terminal());
        assert_eq!(stars.market_pool().count(), 1);
    }

    #[test]
    fn test_with_focal_resets_turn() {
        let state = fixtures::market_league();
        let next = state
            .apply(&TradeAction::for_cash("NYJ", "BUF", "j_rb", 0.0))
            .unwrap();
        let refocused = next.with_focal(&id("MIA")).unwrap();
        assert_eq!(refocused.focal(), &id("MIA"));
        assert_eq!(refocused.active_team(), &id("MIA"));
        assert_eq!(refocused.turn().depth, 0);
        assert!(matches!(
            next.with_focal(&id("KC")),
            Err(LeagueError::UnknownTeam(_))
        ));
    }
}
