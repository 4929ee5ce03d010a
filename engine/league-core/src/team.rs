//! Per-team books: cap space, positional needs and owned assets.

use crate::asset::{AssetId, TeamId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One team inside a [`LeagueState`](crate::LeagueState).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamState {
    pub id: TeamId,
    /// Millions. Negative means the team is over the cap.
    pub cap_space: f64,
    /// Position -> need intensity in [0, 1].
    pub needs: BTreeMap<String, f64>,
    /// Aggregate player value, a proxy for win probability.
    pub roster_value: f64,
    /// Aggregate draft-pick value.
    pub draft_capital: f64,
    pub assets: BTreeSet<AssetId>,
}

impl TeamState {
    pub fn new(id: impl Into<TeamId>, cap_space: f64) -> Self {
        Self {
            id: id.into(),
            cap_space,
            needs: BTreeMap::new(),
            roster_value: 0.0,
            draft_capital: 0.0,
            assets: BTreeSet::new(),
        }
    }

    pub fn with_need(mut self, position: impl Into<String>, intensity: f64) -> Self {
        self.needs.insert(position.into(), intensity.clamp(0.0, 1.0));
        self
    }

    pub fn need(&self, position: &str) -> f64 {
        self.needs.get(position).copied().unwrap_or(0.0)
    }

    /// Most severe need. Ties go to the alphabetically first position.
    pub fn top_need(&self) -> Option<(&str, f64)> {
        self.needs
            .iter()
            .fold(None, |best: Option<(&str, f64)>, (pos, &need)| match best {
                Some((_, top)) if top >= need => best,
                _ => Some((pos.as_str(), need)),
            })
    }

    pub fn owns(&self, asset: &AssetId) -> bool {
        self.assets.contains(asset)
    }
}
