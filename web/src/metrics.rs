//! Prometheus metrics for the trade API.
//!
//! Tracks how proposals are graded, how counter-offers resolve and how long
//! trade searches take.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Once;
use tracing::warn;

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ========== Grading ==========

    /// Proposals graded, by resulting status
    pub static ref EVALUATIONS: IntCounterVec = IntCounterVec::new(
        Opts::new("trade_api_evaluations_total", "Trade proposals graded"),
        &["status"]
    ).expect("valid metric");

    /// Counter-offer requests, by outcome (built / infeasible)
    pub static ref COUNTER_OFFERS: IntCounterVec = IntCounterVec::new(
        Opts::new("trade_api_counter_offers_total", "Counter-offer requests"),
        &["outcome"]
    ).expect("valid metric");

    // ========== Search ==========

    /// Trade searches, by outcome (found / no_trade_found / error)
    pub static ref SEARCHES: IntCounterVec = IntCounterVec::new(
        Opts::new("trade_api_searches_total", "Trade searches run"),
        &["outcome"]
    ).expect("valid metric");

    /// Wall time of one trade search
    pub static ref SEARCH_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("trade_api_search_seconds", "Time to run one trade search")
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0])
    ).expect("valid metric");

    // ========== League ==========

    /// Teams in the loaded snapshot
    pub static ref LEAGUE_TEAMS: IntGauge = IntGauge::with_opts(
        Opts::new("trade_api_league_teams", "Teams in the loaded league snapshot")
    ).expect("valid metric");
}

static INIT: Once = Once::new();

/// Register all metrics with the registry. Safe to call more than once.
pub fn init_metrics() {
    INIT.call_once(|| {
        let collectors: [Box<dyn prometheus::core::Collector>; 5] = [
            Box::new(EVALUATIONS.clone()),
            Box::new(COUNTER_OFFERS.clone()),
            Box::new(SEARCHES.clone()),
            Box::new(SEARCH_SECONDS.clone()),
            Box::new(LEAGUE_TEAMS.clone()),
        ];
        for collector in collectors {
            if let Err(e) = REGISTRY.register(collector) {
                warn!("Failed to register metric: {}", e);
            }
        }
    });
}

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}
