//! End-to-end integration tests for the CivicLens query pipeline.
//!
//! These exercise the full path from an HTTP request to a structured answer,
//! including cache-key derivation, token-budget resolution, section parsing,
//! and error surfacing — with a scripted transport in place of the network.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use civiclens_cache::ResponseCache;
use civiclens_core::error::ProviderError;
use civiclens_core::{ChatProvider, ChatRequest, DetailLevel, Query};
use civiclens_gateway::{ApiV1State, QueryOrchestrator, build_router};
use civiclens_providers::{AnswerProvider, PromptBuilder};

// ── Scripted transport ───────────────────────────────────────────────────

/// Records every wire request and replays a scripted outcome.
struct ScriptedTransport {
    calls: AtomicUsize,
    requests: std::sync::Mutex<Vec<ChatRequest>>,
    outcome: Result<String, ProviderError>,
}

impl ScriptedTransport {
    fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requests: std::sync::Mutex::new(Vec::new()),
            outcome: Ok(text.to_string()),
        })
    }

    fn failing(error: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requests: std::sync::Mutex::new(Vec::new()),
            outcome: Err(error),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ChatProvider for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.outcome.clone()
    }
}

const SAMPLE_ANSWER: &str = "\
The Finance Bill proposes new levies on digital services.\n\n\
This impacts small online businesses through higher compliance costs.\n\n\
Historical background: similar levies were proposed in 2018.\n\n\
Article 209 of the constitution governs taxation powers.";

fn pipeline(transport: Arc<ScriptedTransport>) -> (axum::Router, Arc<ApiV1State>) {
    let orchestrator = QueryOrchestrator::new(
        Arc::new(ResponseCache::new()),
        AnswerProvider::new(PromptBuilder::new(300, 1000), transport, 0.3),
        Duration::from_secs(3600),
    );
    let state = Arc::new(ApiV1State { orchestrator });
    let app = build_router(state.clone(), &["http://localhost:3000".to_string()]);
    (app, state)
}

fn post_query(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/query")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ── E2E: query → structured answer → cache ──────────────────────────────

#[tokio::test]
async fn e2e_detailed_query_uses_high_budget_and_caches() {
    let transport = ScriptedTransport::answering(SAMPLE_ANSWER);
    let (app, _) = pipeline(transport.clone());
    let body = r#"{"query": "What is the Finance Bill?", "detail_level": "detailed"}"#;

    // Cold cache: exactly one provider call, with the detailed budget.
    let first = app.clone().oneshot(post_query(body)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(transport.call_count(), 1);
    {
        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].max_tokens, 1000);
        assert!((requests[0].temperature - 0.3).abs() < f32::EPSILON);
        assert!(requests[0].user_message.contains("What is the Finance Bill?"));
    }

    let answer = json_body(first).await;
    assert!(
        answer["summary"]
            .as_str()
            .unwrap()
            .contains("new levies on digital services")
    );
    assert!(answer["impact"].as_str().unwrap().contains("compliance costs"));
    assert!(
        answer["historical_context"]
            .as_str()
            .unwrap()
            .contains("2018")
    );
    assert!(
        answer["constitutional_references"]
            .as_str()
            .unwrap()
            .contains("Article 209")
    );
    assert_eq!(answer["full_response"].as_str().unwrap(), SAMPLE_ANSWER);

    // Identical second request: served from cache, zero additional calls.
    let second = app.oneshot(post_query(body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(json_body(second).await, answer);
}

#[tokio::test]
async fn e2e_simplified_query_uses_low_budget() {
    let transport = ScriptedTransport::answering(SAMPLE_ANSWER);
    let (app, _) = pipeline(transport.clone());

    let response = app
        .oneshot(post_query(
            r#"{"query": "What is devolution?", "detail_level": "simplified"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests[0].max_tokens, 300);
    assert!(requests[0].user_message.contains("12 years old"));
}

#[tokio::test]
async fn e2e_topic_category_context_reaches_the_wire() {
    let transport = ScriptedTransport::answering(SAMPLE_ANSWER);
    let (app, _) = pipeline(transport.clone());

    let response = app
        .oneshot(post_query(
            r#"{"query": "What are my rights?", "topic_category": "constitution"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let requests = transport.requests.lock().unwrap();
    assert!(
        requests[0]
            .user_message
            .contains("Relevant constitutional sections")
    );
}

// ── E2E: provider failures ──────────────────────────────────────────────

#[tokio::test]
async fn e2e_rate_limited_provider_surfaces_502_and_is_retried() {
    let transport = ScriptedTransport::failing(ProviderError::ApiError {
        status_code: 429,
        body: "insufficient quota".into(),
    });
    let (app, _) = pipeline(transport.clone());
    let body = r#"{"query": "What is the Finance Bill?"}"#;

    let response = app.clone().oneshot(post_query(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error = json_body(response).await;
    assert_eq!(error["error"], true);
    assert!(
        error["details"]
            .as_str()
            .unwrap()
            .contains("insufficient quota")
    );

    // The failure was not cached: the identical retry reaches the provider.
    let retry = app.oneshot(post_query(body)).await.unwrap();
    assert_eq!(retry.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn e2e_network_failure_surfaces_502() {
    let transport =
        ScriptedTransport::failing(ProviderError::Network("connection refused".into()));
    let (app, _) = pipeline(transport);

    let response = app.oneshot(post_query(r#"{"query": "q"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let error = json_body(response).await;
    assert!(error["details"].as_str().unwrap().contains("connection refused"));
}

// ── E2E: orchestrator reuse outside HTTP ────────────────────────────────

#[tokio::test]
async fn e2e_orchestrator_shared_by_http_and_direct_callers() {
    // The `ask` command drives the same orchestrator the gateway uses; a
    // terminal query must warm the cache for an equivalent HTTP request.
    let transport = ScriptedTransport::answering(SAMPLE_ANSWER);
    let (app, state) = pipeline(transport.clone());

    let direct = state
        .orchestrator
        .handle(&Query {
            text: "What is the Finance Bill?".into(),
            detail_level: DetailLevel::Balanced,
            topic_category: None,
        })
        .await
        .unwrap();
    assert_eq!(direct.full_response, SAMPLE_ANSWER);
    assert_eq!(transport.call_count(), 1);

    // Same question over HTTP, differing only in case and whitespace.
    let response = app
        .oneshot(post_query(r#"{"query": "  what is the finance bill?  "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(transport.call_count(), 1);
}

// ── E2E: plumbing endpoints ─────────────────────────────────────────────

#[tokio::test]
async fn e2e_health_and_faqs() {
    let transport = ScriptedTransport::answering(SAMPLE_ANSWER);
    let (app, _) = pipeline(transport);

    let health = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(json_body(health).await["status"], "ok");

    let faqs = app
        .oneshot(
            Request::builder()
                .uri("/v1/faqs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(faqs.status(), StatusCode::OK);
    assert_eq!(json_body(faqs).await["faqs"].as_array().unwrap().len(), 5);
}
