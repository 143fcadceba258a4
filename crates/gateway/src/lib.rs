//! HTTP API gateway for CivicLens.
//!
//! Exposes the query pipeline under a versioned `/v1` path, plus a health
//! check. CORS origins come from configuration.
//!
//! Built on Axum.

pub mod api_v1;
pub mod orchestrator;

use axum::{Router, http::StatusCode, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use civiclens_cache::ResponseCache;
use civiclens_config::AppConfig;
use civiclens_providers::AnswerProvider;

pub use api_v1::{ApiV1State, SharedApiState};
pub use orchestrator::{QueryError, QueryOrchestrator, resolve_topic_context};

/// Build the full router: health check plus the nested v1 API.
pub fn build_router(state: SharedApiState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/v1", api_v1::v1_router(state))
        .layer(cors_layer(cors_origins))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// CORS layer from the configured origin list.
///
/// Origins that fail to parse are skipped with a warning rather than
/// aborting startup.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<axum::http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Build the shared API state from configuration.
///
/// Constructs the cache, the answer provider, and the orchestrator once as
/// explicitly owned instances.
pub fn build_state(config: &AppConfig) -> SharedApiState {
    let orchestrator = QueryOrchestrator::new(
        Arc::new(ResponseCache::new()),
        AnswerProvider::from_config(config),
        Duration::from_secs(config.cache.ttl_secs),
    );
    Arc::new(ApiV1State { orchestrator })
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    if !config.has_api_key() {
        warn!("No provider API key configured — queries will fail upstream");
    }

    let state = build_state(&config);
    let app = build_router(state, &config.gateway.cors_origins);

    info!(addr = %addr, "Gateway starting with v1 API");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
