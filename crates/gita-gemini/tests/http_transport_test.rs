use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use gita_core::GeminiConfig;
use gita_gemini::{GeminiError, GenerateTransport, HttpTransport};
use secrecy::SecretString;
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Seen {
    api_key: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

/// Serve `reply` with `status` on the generateContent path of a local
/// listener and return the base URL.
async fn stub_gemini(status: StatusCode, reply: Value, seen: Seen) -> String {
    let app = Router::new()
        .route(
            "/v1beta/models/test-model:generateContent",
            post(
                move |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| {
                    let reply = reply.clone();
                    async move {
                        *seen.api_key.lock().unwrap() = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_owned);
                        *seen.body.lock().unwrap() = Some(body);
                        (status, Json(reply))
                    }
                },
            ),
        )
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(base_url: String) -> GeminiConfig {
    GeminiConfig {
        base_url,
        model: "test-model".to_owned(),
        timeout_secs: 5,
        ..GeminiConfig::default()
    }
}

fn key() -> Option<SecretString> {
    Some(SecretString::from("test-key".to_owned()))
}

#[tokio::test]
async fn generate_returns_first_candidate_text() {
    let seen = Seen::default();
    let base = stub_gemini(
        StatusCode::OK,
        json!({"candidates": [{"content": {"parts": [{"text": "reply text"}]}}]}),
        seen.clone(),
    )
    .await;

    let transport = HttpTransport::new(&config(base), key()).unwrap();
    let text = transport.generate("the prompt").await.unwrap();

    assert_eq!(text, "reply text");
    assert_eq!(seen.api_key.lock().unwrap().as_deref(), Some("test-key"));
    assert_eq!(
        seen.body.lock().unwrap().clone().unwrap(),
        json!({"contents": [{"parts": [{"text": "the prompt"}]}]})
    );
}

#[tokio::test]
async fn endpoint_does_not_carry_the_key() {
    let transport = HttpTransport::new(&config("http://localhost:1".to_owned()), key()).unwrap();
    assert!(!transport.endpoint().contains("test-key"));
    assert!(transport.has_api_key());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let base = stub_gemini(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "quota"}}),
        Seen::default(),
    )
    .await;

    let transport = HttpTransport::new(&config(base), key()).unwrap();
    let err = transport.generate("p").await.unwrap_err();

    match err {
        GeminiError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("quota"), "got: {body}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_candidates_are_reported() {
    let base = stub_gemini(StatusCode::OK, json!({"candidates": []}), Seen::default()).await;

    let transport = HttpTransport::new(&config(base), key()).unwrap();
    assert!(matches!(
        transport.generate("p").await,
        Err(GeminiError::EmptyResponse)
    ));
}

#[tokio::test]
async fn missing_key_fails_without_a_request() {
    let seen = Seen::default();
    let base = stub_gemini(StatusCode::OK, json!({}), seen.clone()).await;

    let transport = HttpTransport::new(&config(base), None).unwrap();
    assert!(matches!(
        transport.generate("p").await,
        Err(GeminiError::MissingApiKey)
    ));
    assert!(seen.body.lock().unwrap().is_none());
}
