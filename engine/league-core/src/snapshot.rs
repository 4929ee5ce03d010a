//! Read-only league snapshots produced by the data pipeline.
//!
//! ```json
//! {
//!   "teams":  [{"id": "BUF", "cap_space": 10.0, "needs": {"WR": 0.9}, "persona": "contender"}],
//!   "assets": [{"id": "b_qb", "name": "QB1", "kind": "player", "team": "BUF",
//!               "position": "QB", "cap_hit": 40.0, "value": 9.8, "risk_score": 0.2}]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::agent::TeamPersona;
use crate::asset::{Asset, AssetKind, TeamId};
use crate::error::{LeagueError, Result};
use crate::rules::{LeagueRules, Turn};
use crate::state::LeagueState;
use crate::team::TeamState;

/// A persona given either as a preset name or explicit weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonaRecord {
    Preset(String),
    Weights(TeamPersona),
}

impl PersonaRecord {
    pub fn resolve(&self) -> Result<TeamPersona> {
        match self {
            PersonaRecord::Preset(name) => TeamPersona::preset(name),
            PersonaRecord::Weights(w) => TeamPersona::new(w.win, w.cap, w.draft),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub cap_space: f64,
    #[serde(default)]
    pub needs: BTreeMap<String, f64>,
    /// Defaults to the summed value of the team's players.
    #[serde(default)]
    pub roster_value: Option<f64>,
    /// Defaults to the summed value of the team's picks.
    #[serde(default)]
    pub draft_capital: Option<f64>,
    #[serde(default)]
    pub persona: Option<PersonaRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub teams: Vec<TeamRecord>,
    pub assets: Vec<Asset>,
}

impl LeagueSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LeagueError::SnapshotIo {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            teams = snapshot.teams.len(),
            assets = snapshot.assets.len(),
            "Loaded league snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Personas pinned by the snapshot, keyed by team.
    pub fn personas(&self) -> Result<BTreeMap<TeamId, TeamPersona>> {
        self.teams
            .iter()
            .filter_map(|t| t.persona.as_ref().map(|p| (t, p)))
            .map(|(t, p)| p.resolve().map(|persona| (t.id.clone(), persona)))
            .collect()
    }

    pub fn team_states(&self) -> Vec<TeamState> {
        self.teams
            .iter()
            .map(|record| {
                let owned = self.assets.iter().filter(|a| a.team == record.id);
                let (players, picks) = owned.fold((0.0, 0.0), |(players, picks), a| match a.kind {
                    AssetKind::Player => (players + a.value, picks),
                    AssetKind::DraftPick => (players, picks + a.value),
                });
                let mut team = TeamState::new(record.id.clone(), record.cap_space);
                for (position, &need) in &record.needs {
                    if !(0.0..=1.0).contains(&need) {
                        warn!(team = %record.id, position = %position, need, "Clamping need into [0, 1]");
                    }
                    team = team.with_need(position.clone(), need);
                }
                team.roster_value = record.roster_value.unwrap_or(players);
                team.draft_capital = record.draft_capital.unwrap_or(picks);
                team
            })
            .collect()
    }

    pub fn to_state(&self, rules: LeagueRules, turn: Turn) -> Result<LeagueState> {
        LeagueState::new(self.team_states(), self.assets.clone(), rules, turn)
    }
}

impl LeagueState {
    pub fn from_snapshot(snapshot: &LeagueSnapshot, rules: LeagueRules, turn: Turn) -> Result<Self> {
        snapshot.to_state(rules, turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TurnOrder;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "teams": [
            {"id": "BUF", "cap_space": 10.0, "needs": {"WR": 0.9}, "persona": "contender"},
            {"id": "NYJ", "cap_space": 5.0, "persona": {"win": 0.1, "cap": 0.4, "draft": 0.5}},
            {"id": "MIA", "cap_space": 30.0, "roster_value": 50.0}
        ],
        "assets": [
            {"id": "b_qb", "name": "QB1", "kind": "player", "team": "BUF", "position": "QB",
             "cap_hit": 40.0, "value": 9.8, "risk_score": 0.2},
            {"id": "b_pick", "name": "2026 R2", "kind": "draft_pick", "team": "BUF", "position": "PICK",
             "cap_hit": 0.0, "value": 3.0},
            {"id": "j_wr1", "name": "WR1", "type": "player", "team": "NYJ", "position": "WR",
             "cap_hit_millions": 12.0, "surplus_value": 7.5, "risk_score": 0.4, "tradeable": false}
        ]
    }"#;

    #[test]
    fn test_snapshot_to_state_defaults_aggregates() {
        let snapshot = LeagueSnapshot::from_json(SNAPSHOT).unwrap();
        let state = snapshot
            .to_state(LeagueRules::default(), Turn::new("BUF", TurnOrder::FocalOnly, 3))
            .unwrap();

        let buf = state.team(&TeamId::from("BUF")).unwrap();
        assert!((buf.roster_value - 9.8).abs() < 1e-12);
        assert!((buf.draft_capital - 3.0).abs() < 1e-12);
        assert_eq!(buf.assets.len(), 2);

        let mia = state.team(&TeamId::from("MIA")).unwrap();
        assert!((mia.roster_value - 50.0).abs() < 1e-12);

        assert_eq!(state.market_pool().count(), 2);
    }

    #[test]
    fn test_snapshot_personas() {
        let snapshot = LeagueSnapshot::from_json(SNAPSHOT).unwrap();
        let personas = snapshot.personas().unwrap();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas[&TeamId::from("BUF")], TeamPersona::CONTENDER);
        assert_eq!(personas[&TeamId::from("NYJ")], TeamPersona::REBUILDER);
    }

    #[test]
    fn test_unknown_persona_preset() {
        let json = r#"{"teams": [{"id": "BUF", "cap_space": 1.0, "persona": "tanker"}], "assets": []}"#;
        let snapshot = LeagueSnapshot::from_json(json).unwrap();
        assert!(matches!(
            snapshot.personas(),
            Err(LeagueError::InvalidPersona(_))
        ));
    }

    #[test]
    fn test_corrupted_snapshot() {
        let json = r#"{
            "teams": [{"id": "BUF", "cap_space": 1.0}],
            "assets": [{"id": "x", "name": "X", "kind": "player", "team": "KC",
                        "position": "QB", "cap_hit": 1.0, "value": 1.0}]
        }"#;
        let snapshot = LeagueSnapshot::from_json(json).unwrap();
        let err = LeagueState::from_snapshot(
            &snapshot,
            LeagueRules::default(),
            Turn::new("BUF", TurnOrder::FocalOnly, 1),
        )
        .unwrap_err();
        assert!(matches!(err, LeagueError::CorruptedState(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let snapshot = LeagueSnapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.teams.len(), 3);

        assert!(matches!(
            LeagueSnapshot::load(Path::new("/nonexistent/league.json")),
            Err(LeagueError::SnapshotIo { .. })
        ));
        assert!(matches!(
            LeagueSnapshot::from_json("{not json"),
            Err(LeagueError::SnapshotParse(_))
        ));
    }
}
