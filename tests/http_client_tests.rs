//! Tests for the two HTTP clients: the TUI's `ProxyClient` (relay side) and
//! the relay's `GeminiGenerator` (upstream side), both against wiremock.

use parley::api::{ClientError, ProxyClient};
use parley::generate::{GenerateError, GeminiGenerator, TextGenerator};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// ProxyClient
// ============================================================================

#[tokio::test]
async fn test_post_chat_returns_reply_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({ "message": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "hi there" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ProxyClient::new(mock_server.uri());
    let reply = client.post_chat("hello").await.unwrap();
    assert_eq!(reply, "hi there");
}

#[tokio::test]
async fn test_post_chat_maps_error_payload_to_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "An error occurred while processing your request.",
            "details": "API error (HTTP 429): quota exceeded"
        })))
        .mount(&mock_server)
        .await;

    let client = ProxyClient::new(mock_server.uri());
    let err = client.post_chat("hello").await.unwrap_err();

    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("expected Server error, got: {other}"),
    }
}

#[tokio::test]
async fn test_post_chat_maps_400_to_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Message is required" })),
        )
        .mount(&mock_server)
        .await;

    let client = ProxyClient::new(mock_server.uri());
    let err = client.post_chat("hello").await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 400, .. }));
}

#[tokio::test]
async fn test_post_chat_connection_refused_is_network_error() {
    let client = ProxyClient::new("http://127.0.0.1:1");
    let err = client.post_chat("hello").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}

#[tokio::test]
async fn test_post_chat_unparseable_success_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = ProxyClient::new(mock_server.uri());
    let err = client.post_chat("hello").await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn test_health_check_returns_status_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "Server is running" })),
        )
        .mount(&mock_server)
        .await;

    let client = ProxyClient::new(mock_server.uri());
    assert_eq!(client.health_check().await.unwrap(), "Server is running");
}

#[tokio::test]
async fn test_health_check_failure_is_an_error_not_a_panic() {
    let client = ProxyClient::new("http://127.0.0.1:1");
    assert!(client.health_check().await.is_err());
}

// ============================================================================
// GeminiGenerator
// ============================================================================

#[tokio::test]
async fn test_generate_parses_first_candidate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "hello" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "hi there" }], "role": "model" } }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let generator = GeminiGenerator::new("test-key", "gemini-1.5-flash", mock_server.uri());
    let reply = generator.generate("hello").await.unwrap();
    assert_eq!(reply, "hi there");
}

#[tokio::test]
async fn test_generate_maps_api_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&mock_server)
        .await;

    let generator = GeminiGenerator::new("bad-key", "gemini-1.5-flash", mock_server.uri());
    let err = generator.generate("hello").await.unwrap_err();

    match err {
        GenerateError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("API key not valid"));
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn test_generate_empty_candidates_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&mock_server)
        .await;

    let generator = GeminiGenerator::new("test-key", "gemini-1.5-flash", mock_server.uri());
    let err = generator.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerateError::Parse(_)));
}

#[tokio::test]
async fn test_generate_connection_refused_is_network_error() {
    let generator = GeminiGenerator::new("test-key", "gemini-1.5-flash", "http://127.0.0.1:1");
    let err = generator.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerateError::Network(_)));
}
