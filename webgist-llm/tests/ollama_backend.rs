mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webgist_common::ModelError;
use webgist_llm::{OllamaClient, ModelClient, Prompt};

fn prompt() -> Prompt {
    Prompt {
        system_instruction: "summarize briefly".to_string(),
        content: "You are looking at a website titled 'X'.\nSome text.".to_string(),
    }
}

fn client_for(server: &MockServer) -> OllamaClient {
    OllamaClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn generate_returns_text_and_latency() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3.2",
            "system": "summarize briefly",
            "stream": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2",
            "response": "A short summary.",
            "eval_count": 12,
        })))
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .generate(&prompt(), "llama3.2")
        .await
        .unwrap();

    assert_eq!(resp.text, "A short summary.");
    assert_eq!(resp.model, "llama3.2");
    assert!(resp.latency > Duration::ZERO);
}

#[tokio::test]
async fn missing_model_is_not_conflated_with_down_backend() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "model 'nope' not found, try pulling it first"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&prompt(), "nope")
        .await
        .unwrap_err();

    assert_eq!(err, ModelError::ModelNotFound("nope".to_string()));
}

#[tokio::test]
async fn unreachable_backend_is_backend_unavailable() {
    common::init_test_tracing();
    let client = OllamaClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

    let err = client.generate(&prompt(), "llama3.2").await.unwrap_err();
    assert_eq!(err, ModelError::BackendUnavailable);
    assert!(!client.health_check().await);
}

#[tokio::test]
async fn blank_generation_is_an_empty_response() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"model": "llama3.2", "response": "  "})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate(&prompt(), "llama3.2")
        .await
        .unwrap_err();

    assert_eq!(err, ModelError::EmptyResponse);
}

#[tokio::test]
async fn slow_generation_times_out() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "late"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = OllamaClient::new(&server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.generate(&prompt(), "llama3.2").await.unwrap_err();
    assert_eq!(err, ModelError::Timeout);
}

#[tokio::test]
async fn list_models_reads_tag_names() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "llama3.2:latest", "size": 1},
                {"name": "qwen2.5:7b", "size": 2},
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let models = client.list_models().await.unwrap();
    assert_eq!(models, vec!["llama3.2:latest", "qwen2.5:7b"]);
    assert!(client.health_check().await);
}
