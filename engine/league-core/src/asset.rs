//! Tradeable assets and the string identifiers used throughout the league model.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Position marker carried by draft picks.
pub const PICK_POSITION: &str = "PICK";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a player contract or draft pick.
    AssetId
);
string_id!(
    /// Team abbreviation, e.g. `BUF`.
    TeamId
);

/// What an asset represents on a team's books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Player,
    DraftPick,
}

fn default_tradeable() -> bool {
    true
}

/// A tradeable unit. Never mutated once created; ownership changes only by
/// producing a new [`LeagueState`](crate::LeagueState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    #[serde(alias = "type")]
    pub kind: AssetKind,
    /// Owner at the time the asset was created.
    pub team: TeamId,
    pub position: String,
    /// Cap hit in millions.
    #[serde(alias = "cap_hit_millions")]
    pub cap_hit: f64,
    /// Market surplus value.
    #[serde(alias = "surplus_value")]
    pub value: f64,
    /// Above 1.0 the contract is a liability exceeding its cap hit.
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default = "default_tradeable")]
    pub tradeable: bool,
}

impl Asset {
    pub fn player(
        id: impl Into<AssetId>,
        name: impl Into<String>,
        team: impl Into<TeamId>,
        position: impl Into<String>,
        cap_hit: f64,
        value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: AssetKind::Player,
            team: team.into(),
            position: position.into(),
            cap_hit,
            value,
            risk_score: 0.0,
            tradeable: true,
        }
    }

    /// A draft pick carries no cap hit until it is signed.
    pub fn draft_pick(
        id: impl Into<AssetId>,
        name: impl Into<String>,
        team: impl Into<TeamId>,
        value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: AssetKind::DraftPick,
            team: team.into(),
            position: PICK_POSITION.to_string(),
            cap_hit: 0.0,
            value,
            risk_score: 0.0,
            tradeable: true,
        }
    }

    pub fn with_risk(mut self, risk_score: f64) -> Self {
        self.risk_score = risk_score;
        self
    }

    /// Mark the asset as off the market (e.g. a no-trade clause).
    pub fn untradeable(mut self) -> Self {
        self.tradeable = false;
        self
    }

    pub fn is_pick(&self) -> bool {
        self.kind == AssetKind::DraftPick
    }

    pub fn is_liability(&self) -> bool {
        self.risk_score > 1.0
    }

    /// Position whose need this asset fills, if any.
    pub fn need_position(&self) -> Option<&str> {
        if self.is_pick() || self.position == PICK_POSITION {
            None
        } else {
            Some(&self.position)
        }
    }
}
