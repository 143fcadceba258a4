//! HTTP API v1 — the query pipeline and the static FAQ list.
//!
//! Endpoints:
//!
//! - `POST /v1/query` — Ask a civic question, get a structured answer
//! - `GET  /v1/faqs`  — List frequently asked questions

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use civiclens_core::{DetailLevel, Query, StructuredAnswer};

use crate::orchestrator::{QueryError, QueryOrchestrator};

/// Shared state for the v1 API.
pub struct ApiV1State {
    pub orchestrator: QueryOrchestrator,
}

pub type SharedApiState = Arc<ApiV1State>;

/// Build the v1 API router. Nest this under "/v1" in the main router.
pub fn v1_router(state: SharedApiState) -> Router {
    Router::new()
        .route("/query", post(query_handler))
        .route("/faqs", get(faqs_handler))
        .with_state(state)
}

// ── DTOs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The civic/political question.
    pub query: String,

    /// Desired depth; defaults to balanced.
    #[serde(default)]
    pub detail_level: DetailLevel,

    /// Optional category hint ("policy", "constitution", ...).
    #[serde(default)]
    pub topic_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    fn new(message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            details,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FaqItem {
    pub question: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FaqList {
    pub faqs: Vec<FaqItem>,
}

// ── Handlers ──────────────────────────────────────────────────────────────

/// Run one query through the pipeline.
///
/// Provider failures map to 502 (upstream failure, distinct from generic
/// 5xx); anything else inside orchestration maps to 500 with an opaque
/// message. Neither is cached.
async fn query_handler(
    State(state): State<SharedApiState>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<StructuredAnswer>, (StatusCode, Json<ErrorBody>)> {
    if payload.query.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Query text must not be empty.", None)),
        ));
    }

    let query = Query {
        text: payload.query,
        detail_level: payload.detail_level,
        topic_category: payload.topic_category,
    };

    match state.orchestrator.handle(&query).await {
        Ok(answer) => Ok(Json(answer)),
        Err(QueryError::Upstream(e)) => {
            error!(error = %e, "Provider request failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody::new(
                    e.to_string(),
                    Some(e.details().to_string()),
                )),
            ))
        }
        Err(QueryError::Internal(details)) => {
            error!(details = %details, "Internal error while handling query");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(
                    "Internal server error occurred.",
                    Some(details),
                )),
            ))
        }
    }
}

/// Return the static FAQ list.
async fn faqs_handler() -> Json<FaqList> {
    // In production these would come from a database.
    Json(FaqList {
        faqs: vec![
            FaqItem {
                question: "What does the Finance Bill 2024 mean for ordinary Kenyans?",
                category: "policy",
            },
            FaqItem {
                question: "How does devolution affect my county's budget?",
                category: "governance",
            },
            FaqItem {
                question: "What were the main promises in the 2022 elections?",
                category: "politics",
            },
            FaqItem {
                question: "How is the judiciary structured in Kenya?",
                category: "constitution",
            },
            FaqItem {
                question: "What are my rights as a Kenyan citizen?",
                category: "rights",
            },
        ],
    })
}
