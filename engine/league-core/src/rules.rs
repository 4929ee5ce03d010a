//! League-wide trade rules and turn metadata.

use crate::asset::{Asset, TeamId};
use crate::error::{LeagueError, Result};
use league_config::LeagueConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rules shared by every state derived from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueRules {
    /// Lowest cap space a trade may leave a team with. `None` is unrestricted.
    pub cap_floor: Option<f64>,
    /// Owners never offer assets valued at or above this.
    pub untouchable_value: f64,
    /// Need removed from the receiver (and returned to the giver) per moved player.
    pub need_decay: f64,
    /// Cash offsets enumerated for asset-for-compensation trades.
    pub compensation_ladder: Vec<f64>,
    /// Only shop at the buyer's most severe need.
    pub target_top_need: bool,
}

impl LeagueRules {
    /// Runtime rules from the `[league]` section, rejecting values that would
    /// make enumerated trades illegal.
    pub fn from_config(config: &LeagueConfig) -> Result<Self> {
        let rules = Self::unchecked(config);
        rules.validate()?;
        Ok(rules)
    }

    fn unchecked(config: &LeagueConfig) -> Self {
        Self {
            cap_floor: config.cap_floor,
            untouchable_value: config.untouchable_value,
            need_decay: config.need_decay,
            compensation_ladder: config.compensation_ladder.clone(),
            target_top_need: config.target_top_need,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(floor) = self.cap_floor {
            if !floor.is_finite() {
                return Err(invalid(format!("cap_floor must be finite, got {floor}")));
            }
        }
        if self.untouchable_value.is_nan() {
            return Err(invalid("untouchable_value must be a number".into()));
        }
        if !(0.0..=1.0).contains(&self.need_decay) {
            return Err(invalid(format!(
                "need_decay must be in [0, 1], got {}",
                self.need_decay
            )));
        }
        if let Some(rung) = self
            .compensation_ladder
            .iter()
            .find(|c| !c.is_finite() || **c < 0.0)
        {
            return Err(invalid(format!(
                "compensation_ladder rungs must be non-negative, got {rung}"
            )));
        }
        Ok(())
    }

    pub fn with_cap_floor(mut self, floor: f64) -> Self {
        self.cap_floor = Some(floor);
        self
    }

    pub fn with_compensation_ladder(mut self, ladder: Vec<f64>) -> Self {
        self.compensation_ladder = ladder;
        self
    }

    pub fn with_target_top_need(mut self, enabled: bool) -> Self {
        self.target_top_need = enabled;
        self
    }

    pub fn is_untouchable(&self, asset: &Asset) -> bool {
        asset.value >= self.untouchable_value
    }

    /// On the market and below the untouchable threshold.
    pub fn is_willing(&self, asset: &Asset) -> bool {
        asset.tradeable && !self.is_untouchable(asset)
    }

    pub fn breaches_floor(&self, cap_space: f64) -> bool {
        self.cap_floor.is_some_and(|floor| cap_space < floor)
    }
}

impl Default for LeagueRules {
    fn default() -> Self {
        Self::unchecked(&LeagueConfig::default())
    }
}

fn invalid(reason: String) -> LeagueError {
    LeagueError::InvalidRules(reason)
}

/// Who proposes after each applied trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    /// The focal team proposes every trade.
    #[default]
    FocalOnly,
    /// Teams take turns in id order, wrapping around.
    RoundRobin,
}

impl FromStr for TurnOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focal_only" | "focal" => Ok(TurnOrder::FocalOnly),
            "round_robin" | "roundrobin" => Ok(TurnOrder::RoundRobin),
            other => Err(format!(
                "unknown turn order '{other}', expected 'focal_only' or 'round_robin'"
            )),
        }
    }
}

impl fmt::Display for TurnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnOrder::FocalOnly => f.write_str("focal_only"),
            TurnOrder::RoundRobin => f.write_str("round_robin"),
        }
    }
}

/// Whose-turn metadata embedded in every state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Team whose utility the search maximizes.
    pub focal: TeamId,
    /// Team proposing the next trade.
    pub active: TeamId,
    pub order: TurnOrder,
    /// Trades applied since the snapshot.
    pub depth: u32,
    pub max_depth: u32,
}

impl Turn {
    pub fn new(focal: impl Into<TeamId>, order: TurnOrder, max_depth: u32) -> Self {
        let focal = focal.into();
        Self {
            active: focal.clone(),
            focal,
            order,
            depth: 0,
            max_depth,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.depth >= self.max_depth
    }
}
