//! Trade actions: pure data describing an atomic transfer between two teams.

use crate::asset::{Asset, AssetId, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the target team sends back to the source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Compensation {
    #[serde(default)]
    pub assets: Vec<AssetId>,
    /// Cap-equivalent offset in millions.
    #[serde(default)]
    pub cash: f64,
}

impl Compensation {
    pub fn cash(cash: f64) -> Self {
        Self {
            assets: Vec::new(),
            cash,
        }
    }

    pub fn assets(assets: Vec<AssetId>) -> Self {
        Self { assets, cash: 0.0 }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.cash == 0.0
    }
}

/// `assets` move from `source` to `target`; `compensation` moves back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAction {
    pub source: TeamId,
    pub target: TeamId,
    pub assets: Vec<AssetId>,
    #[serde(default)]
    pub compensation: Compensation,
    /// Synthetic pick added by the negotiator. Its `team` is the giver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweetener: Option<Asset>,
}

impl TradeAction {
    pub fn new(
        source: impl Into<TeamId>,
        target: impl Into<TeamId>,
        assets: Vec<AssetId>,
        compensation: Compensation,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            assets,
            compensation,
            sweetener: None,
        }
    }

    /// Single asset for a cash offset.
    pub fn for_cash(
        source: impl Into<TeamId>,
        target: impl Into<TeamId>,
        asset: impl Into<AssetId>,
        cash: f64,
    ) -> Self {
        Self::new(source, target, vec![asset.into()], Compensation::cash(cash))
    }

    /// Single asset for a single asset.
    pub fn swap(
        source: impl Into<TeamId>,
        target: impl Into<TeamId>,
        asset: impl Into<AssetId>,
        returned: impl Into<AssetId>,
    ) -> Self {
        Self::new(
            source,
            target,
            vec![asset.into()],
            Compensation::assets(vec![returned.into()]),
        )
    }

    pub fn with_sweetener(mut self, sweetener: Asset) -> Self {
        self.sweetener = Some(sweetener);
        self
    }

    pub fn is_party(&self, team: &TeamId) -> bool {
        &self.source == team || &self.target == team
    }

    pub fn counterparty(&self, team: &TeamId) -> Option<&TeamId> {
        if &self.source == team {
            Some(&self.target)
        } else if &self.target == team {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Assets leaving `source`, sweetener included.
    pub fn source_asset_count(&self) -> usize {
        self.assets.len() + usize::from(self.sweetener_from(&self.source))
    }

    /// Assets leaving `target`, sweetener included.
    pub fn target_asset_count(&self) -> usize {
        self.compensation.assets.len() + usize::from(self.sweetener_from(&self.target))
    }

    fn sweetener_from(&self, team: &TeamId) -> bool {
        self.sweetener.as_ref().is_some_and(|s| &s.team == team)
    }
}

fn write_ids(f: &mut fmt::Formatter<'_>, ids: &[AssetId]) -> fmt::Result {
    f.write_str("[")?;
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{id}")?;
    }
    f.write_str("]")
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sends ", self.source)?;
        write_ids(f, &self.assets)?;
        write!(f, " to {} for ", self.target)?;
        let comp = &self.compensation;
        if comp.assets.is_empty() {
            write!(f, "${:.1}M", comp.cash)?;
        } else {
            write_ids(f, &comp.assets)?;
            if comp.cash != 0.0 {
                write!(f, " + ${:.1}M", comp.cash)?;
            }
        }
        if let Some(pick) = &self.sweetener {
            write!(f, " (+ {} from {}, {:.2})", pick.id, pick.team, pick.value)?;
        }
        Ok(())
    }
}
