//! League model for trade negotiation search
//!
//! This crate provides the state space the search engine walks:
//! - `LeagueState`: immutable snapshot of teams, assets and turn metadata
//! - `TradeAction`: one proposal and the transition it induces
//! - `Agent` / `TeamPersona`: the utility each front office maximizes
//! - `Negotiation`: legality plus the mutual-acceptance filter on trades
//! - `grade`, `counter_offer`, `scan_league`, `find_partners`: the trade desk tools
//! - `WinModel`: projected win and betting-line shift of a proposal

pub mod action;
pub mod admissibility;
pub mod agent;
pub mod asset;
pub mod error;
pub mod grading;
pub mod negotiator;
pub mod partners;
pub mod rules;
pub mod scan;
pub mod snapshot;
pub mod state;
pub mod team;
pub mod win_impact;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export main types for convenience
pub use action::{Compensation, TradeAction};
pub use admissibility::{is_admissible, Appraisal, Candidate, Negotiation, DELTA_TOLERANCE};
pub use agent::{assign_personas, Agent, PersonaRules, TeamPersona};
pub use asset::{Asset, AssetId, AssetKind, TeamId, PICK_POSITION};
pub use error::{IllegalAction, LeagueError, Result};
pub use grading::{grade, Analysis, Grade, GradingRules, Status, Verdict};
pub use negotiator::{counter_offer, CounterOffer};
pub use partners::{find_partners, PartnerFit};
pub use rules::{LeagueRules, Turn, TurnOrder};
pub use scan::{scan_league, ScanResult};
pub use snapshot::{LeagueSnapshot, PersonaRecord, TeamRecord};
pub use state::LeagueState;
pub use team::TeamState;
pub use win_impact::{position_weight, PackageImpact, WinImpact, WinModel};
