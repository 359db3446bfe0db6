//! Provider adapters against a local mock upstream.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde_json::{json, Value};

use paperforge_core::{CompletionRequest, ImageTextProvider, ProviderError};
use paperforge_understanding::providers::{gemini::GeminiProvider, groq::GroqProvider};

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<Value>>>,
    headers: Arc<Mutex<Option<HeaderMap>>>,
    path: Arc<Mutex<Option<String>>>,
}

async fn groq_ok(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    *captured.body.lock().unwrap() = Some(body);
    *captured.headers.lock().unwrap() = Some(headers);
    Json(json!({
        "choices": [{"message": {"role": "assistant", "content": "  1. What is 2+2? [2]\n"}}],
        "usage": {"total_tokens": 77}
    }))
}

async fn gemini_ok(
    State(captured): State<Captured>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    *captured.body.lock().unwrap() = Some(body);
    *captured.headers.lock().unwrap() = Some(headers);
    *captured.path.lock().unwrap() = Some(model_action);
    Json(json!({
        "candidates": [{"content": {"parts": [{"text": "Q1: Fill in the blanks. [5]"}]}}]
    }))
}

async fn unauthorized() -> impl IntoResponse {
    (StatusCode::UNAUTHORIZED, r#"{"error":{"message":"Invalid API Key"}}"#)
}

async fn garbage() -> impl IntoResponse {
    (StatusCode::OK, "this is not json")
}

async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn page_request() -> CompletionRequest {
    CompletionRequest::new("extract please", Bytes::from_static(b"\x89PNG fake"), "image/png")
}

#[tokio::test]
async fn groq_sends_data_url_and_temperature() {
    let captured = Captured::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(groq_ok))
        .with_state(captured.clone());
    let base = spawn_upstream(app).await;

    let provider = GroqProvider::new("gsk_secret")
        .with_model("test-model")
        .with_base_url(format!("{}/v1", base));
    let response = provider.extract_text(&page_request()).await.unwrap();

    assert_eq!(response.text, "  1. What is 2+2? [2]\n");
    assert_eq!(response.tokens_used, 77);
    assert_eq!(response.provider, "groq");

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "test-model");
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.1).abs() < 1e-6);
    let url = body["messages"][0]["content"][1]["image_url"]["url"]
        .as_str()
        .unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
    assert_eq!(body["messages"][0]["content"][0]["text"], "extract please");

    let headers = captured.headers.lock().unwrap().clone().unwrap();
    assert_eq!(headers["authorization"], "Bearer gsk_secret");
}

#[tokio::test]
async fn groq_non_success_status_is_reported() {
    let app = Router::new().route("/v1/chat/completions", post(unauthorized));
    let base = spawn_upstream(app).await;

    let provider = GroqProvider::new("bad").with_base_url(format!("{}/v1", base));
    let err = provider.extract_text(&page_request()).await.unwrap_err();

    match err {
        ProviderError::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API Key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn groq_malformed_body_is_reported() {
    let app = Router::new().route("/v1/chat/completions", post(garbage));
    let base = spawn_upstream(app).await;

    let provider = GroqProvider::new("key").with_base_url(format!("{}/v1", base));
    let err = provider.extract_text(&page_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse { .. }));
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = GroqProvider::new("key").with_base_url(format!("http://{}", addr));
    let err = provider.extract_text(&page_request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Transport { .. }));
}

#[tokio::test]
async fn gemini_sends_inline_data_with_key_header() {
    let captured = Captured::default();
    let app = Router::new()
        .route("/v1beta/models/:model_action", post(gemini_ok))
        .with_state(captured.clone());
    let base = spawn_upstream(app).await;

    let provider = GeminiProvider::new("AIzaTestKey")
        .with_model("gemini-1.5-flash")
        .with_base_url(format!("{}/v1beta", base));
    let response = provider
        .extract_text(&page_request().with_temperature(0.0))
        .await
        .unwrap();

    assert_eq!(response.text, "Q1: Fill in the blanks. [5]");
    assert_eq!(response.tokens_used, 0);

    let path = captured.path.lock().unwrap().clone().unwrap();
    assert_eq!(path, "gemini-1.5-flash:generateContent");

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
    assert_eq!(body["generationConfig"]["temperature"], 0.0);

    let headers = captured.headers.lock().unwrap().clone().unwrap();
    assert_eq!(headers["x-goog-api-key"], "AIzaTestKey");
}

#[tokio::test]
async fn gemini_non_success_status_is_reported() {
    let app = Router::new().route("/v1beta/models/:model_action", post(unauthorized));
    let base = spawn_upstream(app).await;

    let provider = GeminiProvider::new("AIzaBad").with_base_url(format!("{}/v1beta", base));
    let err = provider.extract_text(&page_request()).await.unwrap_err();

    match err {
        ProviderError::Status {
            provider,
            status,
            body,
        } => {
            assert_eq!(provider, "gemini");
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API Key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
