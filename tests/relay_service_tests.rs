//! End-to-end tests for the relay service: the real router served on an
//! ephemeral port, with the Gemini API stubbed out by wiremock.

use std::net::SocketAddr;
use std::sync::Arc;

use parley::generate::GeminiGenerator;
use parley::server::{AppState, router};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

/// Serves the relay against the given (mock) Gemini host and returns its
/// local address.
async fn spawn_relay(gemini_base_url: &str) -> SocketAddr {
    let generator = Arc::new(GeminiGenerator::new(
        "test-key",
        "gemini-1.5-flash",
        gemini_base_url,
    ));
    let app = router(AppState { generator });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A canned Gemini success body with one candidate.
fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }
        ]
    })
}

#[tokio::test]
async fn test_chat_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "hello" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("hi there")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let addr = spawn_relay(&mock_server.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/chat"))
        .json(&json!({ "message": "hello" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "response": "hi there" }));
}

#[tokio::test]
async fn test_missing_message_returns_400_without_upstream_call() {
    let mock_server = MockServer::start().await;

    // Zero calls may reach the generation API.
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("unused")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let addr = spawn_relay(&mock_server.uri()).await;
    let client = reqwest::Client::new();

    for body in [json!({}), json!({ "message": "" }), json!({ "message": "   " })] {
        let response = client
            .post(format!("http://{addr}/api/chat"))
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let payload: Value = response.json().await.unwrap();
        assert_eq!(payload, json!({ "error": "Message is required" }));
    }
}

#[tokio::test]
async fn test_upstream_error_returns_500_with_details_after_one_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1) // exactly one attempt — no retries
        .mount(&mock_server)
        .await;

    let addr = spawn_relay(&mock_server.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/chat"))
        .json(&json!({ "message": "hello" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "An error occurred while processing your request."
    );
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("429"), "details was: {details}");
}

#[tokio::test]
async fn test_malformed_upstream_body_returns_500() {
    let mock_server = MockServer::start().await;

    // 200 with no candidates: upstream succeeded transport-wise but
    // produced nothing usable.
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let addr = spawn_relay(&mock_server.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/chat"))
        .json(&json!({ "message": "hello" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["details"].as_str().unwrap().contains("candidate"));
}

#[tokio::test]
async fn test_unreachable_upstream_returns_500() {
    // Point the relay at a port nothing listens on.
    let addr = spawn_relay("http://127.0.0.1:1").await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/chat"))
        .json(&json!({ "message": "hello" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "An error occurred while processing your request."
    );
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_health_endpoint_returns_fixed_payload() {
    let mock_server = MockServer::start().await;
    let addr = spawn_relay(&mock_server.uri()).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/api/test"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "Server is running" }));
}
