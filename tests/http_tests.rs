//! Black-box tests for the HTTP surface, driving the router directly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use pop_server::adapter::http::{build_router, AppState};
use pop_server::adapter::sqlite::{create_pool, run_migrations, SqlitePostStore};
use pop_server::error::Result;
use pop_server::port::Llm;
use pop_server::service::{PostAnalyzer, ProviderSet};

/// LLM stub returning a fixed reply, counting invocations.
struct CannedLlm {
    response: String,
    calls: Arc<AtomicUsize>,
}

impl CannedLlm {
    fn new(response: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                response: response.into(),
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl Llm for CannedLlm {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

const WELL_FORMED: &str = r#"{
    "question": "Will ETH flip BTC by market cap before 2027?",
    "options": ["Yes", "No"],
    "category": "Crypto",
    "confidence": 0.85
}"#;

fn app_with_llm(response: &str) -> (Router, Arc<AtomicUsize>) {
    let (llm, calls) = CannedLlm::new(response);
    let providers = ProviderSet::PrimaryOnly(Arc::new(llm));
    (app_with_providers(providers), calls)
}

fn app_with_providers(providers: ProviderSet) -> Router {
    let pool = create_pool(":memory:").expect("pool");
    run_migrations(&pool).expect("migrations");

    build_router(AppState {
        analyzer: Arc::new(PostAnalyzer::new(providers)),
        store: Arc::new(SqlitePostStore::new(pool)),
    })
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// -----------------------------------------------------------------------------
// POST /api/post-analyzer/analyze
// -----------------------------------------------------------------------------

#[tokio::test]
async fn analyze_returns_market_analysis() {
    let (app, _) = app_with_llm(WELL_FORMED);

    let body = r#"{"content": "ETH will flip BTC, mark my words", "source": "twitter", "postId": "123"}"#;
    let response = app
        .oneshot(post_json("/api/post-analyzer/analyze", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["question"], "Will ETH flip BTC by market cap before 2027?");
    assert_eq!(json["options"].as_array().unwrap().len(), 2);
    assert_eq!(json["category"], "Crypto");
    let confidence = json["confidence"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&confidence));
}

#[tokio::test]
async fn tweet_analyzer_alias_routes_to_same_handler() {
    let (app, _) = app_with_llm(WELL_FORMED);

    let body = r#"{"content": "some tweet", "source": "twitter", "postId": "9"}"#;
    let response = app
        .oneshot(post_json("/api/tweet-analyzer/analyze", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn oversized_content_is_rejected_before_pipeline() {
    let (app, calls) = app_with_llm(WELL_FORMED);

    let long = "x".repeat(1001);
    let body = format!(r#"{{"content": "{long}", "source": "twitter", "postId": "123"}}"#);
    let response = app
        .oneshot(post_json("/api/post-analyzer/analyze", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(calls.load(Ordering::SeqCst), 0, "pipeline must not run");
}

#[tokio::test]
async fn invalid_source_returns_contract_message() {
    let (app, _) = app_with_llm(WELL_FORMED);

    let body = r#"{"content": "hi", "source": "reddit", "postId": "123"}"#;
    let response = app
        .oneshot(post_json("/api/post-analyzer/analyze", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["message"], r#"Source must be either "twitter" or "farcaster""#);
    assert_eq!(json["statusCode"], 400);
}

#[tokio::test]
async fn empty_content_and_empty_post_id_are_rejected() {
    let (app, _) = app_with_llm(WELL_FORMED);

    let body = r#"{"content": "", "source": "twitter", "postId": "123"}"#;
    let response = app
        .clone()
        .oneshot(post_json("/api/post-analyzer/analyze", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = r#"{"content": "hi", "source": "twitter", "postId": ""}"#;
    let response = app
        .oneshot(post_json("/api/post-analyzer/analyze", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unconfigured_provider_maps_to_500() {
    let app = app_with_providers(ProviderSet::Unconfigured);

    let body = r#"{"content": "hi", "source": "farcaster", "postId": "123"}"#;
    let response = app
        .oneshot(post_json("/api/post-analyzer/analyze", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    let message = json["message"].as_str().unwrap();
    assert!(
        message.starts_with("Failed to analyze post:"),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn malformed_model_reply_maps_to_500() {
    let (app, _) = app_with_llm("no json here, sorry");

    let body = r#"{"content": "hi", "source": "twitter", "postId": "123"}"#;
    let response = app
        .oneshot(post_json("/api/post-analyzer/analyze", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert!(json["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to analyze post:"));
}

#[tokio::test]
async fn out_of_range_confidence_is_defaulted_end_to_end() {
    let reply = "Sure! Here is the market: {\"question\":\"Will X happen?\",\"options\":[\"Yes\",\"No\"],\"category\":\"Technology\",\"confidence\":1.4}";
    let (app, _) = app_with_llm(reply);

    let body = r#"{"content": "will X happen?", "source": "twitter", "postId": "123"}"#;
    let response = app
        .oneshot(post_json("/api/post-analyzer/analyze", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["confidence"], 0.5);
}

// -----------------------------------------------------------------------------
// GET /api/markets/exists and POST /api/markets/register
// -----------------------------------------------------------------------------

#[tokio::test]
async fn exists_is_false_then_true_after_register() {
    let (app, _) = app_with_llm(WELL_FORMED);

    let response = app
        .clone()
        .oneshot(get("/api/markets/exists?postId=123&source=twitter"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["exists"], false);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/markets/register",
            r#"{"source": "twitter", "postId": "123"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let record = json_body(response).await;
    assert_eq!(record["source"], "twitter");
    assert_eq!(record["postId"], "123");

    let response = app
        .oneshot(get("/api/markets/exists?postId=123&source=twitter"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["exists"], true);
}

#[tokio::test]
async fn register_twice_returns_same_record() {
    let (app, _) = app_with_llm(WELL_FORMED);
    let body = r#"{"source": "farcaster", "postId": "0xcast"}"#;

    let first = json_body(
        app.clone()
            .oneshot(post_json("/api/markets/register", body))
            .await
            .unwrap(),
    )
    .await;
    let second = json_body(
        app.oneshot(post_json("/api/markets/register", body))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["createdAt"], second["createdAt"]);
}

#[tokio::test]
async fn exists_requires_post_id_and_valid_source() {
    let (app, _) = app_with_llm(WELL_FORMED);

    let response = app
        .clone()
        .oneshot(get("/api/markets/exists?source=twitter"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get("/api/markets/exists?postId=1&source=myspace"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["message"], r#"Source must be either "twitter" or "farcaster""#);
}

// -----------------------------------------------------------------------------
// Health
// -----------------------------------------------------------------------------

#[tokio::test]
async fn health_check_is_ok() {
    let (app, _) = app_with_llm(WELL_FORMED);
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
