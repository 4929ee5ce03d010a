//! Trade API server
//!
//! HTTP boundary over the league model and the trade search.
//! Endpoints:
//! - GET  /health                          - Health check
//! - GET  /metrics                         - Prometheus metrics
//! - GET  /league                          - Teams and personas of the loaded snapshot
//! - POST /api/trade/evaluate              - Grade a proposal (with counter-offer)
//! - POST /api/trade/counter               - Sweetener that closes the rejecting side's gap
//! - POST /api/trade/search                - MCTS search for one focal team
//! - GET  /api/trade/scan?limit=N          - Mutually beneficial trades league-wide
//! - GET  /api/trade/find_partner/:asset_id - Teams best placed to take an asset
//! - POST /api/analyze/vegas               - Projected win and odds shift per side

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use league_config::load_config;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

mod handlers;
mod league;
mod metrics;
mod types;

use handlers::{
    analyze_vegas, counter_trade, evaluate_trade, find_partner, get_league, health,
    metrics_handler, scan_trades, search_trade,
};
use league::LeagueContext;

/// Shared application state
pub struct AppState {
    /// Loaded league, personas and search settings
    pub league: Arc<LeagueContext>,
    /// CORS origins. Empty allows any origin.
    pub allowed_origins: Vec<String>,
    /// Ceiling on iterations for one search request
    pub max_search_iterations: u32,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return cors.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Create the application router with the given state.
/// This is separated out for testing purposes.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.allowed_origins);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/league", get(get_league))
        .route("/api/trade/evaluate", post(evaluate_trade))
        .route("/api/trade/counter", post(counter_trade))
        .route("/api/trade/search", post(search_trade))
        .route("/api/trade/scan", get(scan_trades))
        .route("/api/trade/find_partner/:asset_id", get(find_partner))
        .route("/api/analyze/vegas", post(analyze_vegas))
        .layer(cors)
        .with_state(state)
}

/// Application state over a canned league (no snapshot file, no logging)
#[cfg(test)]
pub fn create_test_state() -> Arc<AppState> {
    create_test_state_for(league_core::fixtures::market())
}

#[cfg(test)]
pub fn create_test_state_for(
    (state, negotiation): (league_core::LeagueState, league_core::Negotiation),
) -> Arc<AppState> {
    metrics::init_metrics();
    Arc::new(AppState {
        league: Arc::new(LeagueContext::new(
            state,
            negotiation,
            league_core::GradingRules::default(),
            mcts::MctsConfig::for_testing(),
        )),
        allowed_origins: Vec::new(),
        max_search_iterations: 200,
    })
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Creates a future that completes when a shutdown signal is received.
/// Handles Ctrl+C on all platforms.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        return;
    }
    info!("Shutdown signal received, stopping server...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from config.toml with env var overrides
    let config = load_config();
    init_tracing(&config.common.log_level);
    info!(
        league_path = %config.common.league_path,
        iterations = config.search.iterations,
        threads = config.search.threads,
        "Configuration loaded"
    );

    metrics::init_metrics();
    let league = LeagueContext::load(&config)?;
    metrics::LEAGUE_TEAMS.set(league.state.teams().count() as i64);

    let state = Arc::new(AppState {
        league: Arc::new(league),
        allowed_origins: config.web.allowed_origins.clone(),
        max_search_iterations: config.web.max_search_iterations,
    });

    // Build router
    let app = create_app(state);

    let addr = format!("{}:{}", config.web.host, config.web.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

// ============================================================================
// Integration Tests
// ============================================================================
