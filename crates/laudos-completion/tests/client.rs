//! Completion client against a local mock HTTP server.

use std::time::Duration;

use laudos_completion::client::{ClientConfig, CompletionClient};
use laudos_completion::error::CompletionError;
use laudos_completion::service::CompletionService;
use laudos_core::models::completion::CompletionRequest;
use mockito::{Matcher, Server};

fn client_for(server: &Server) -> CompletionClient {
    let mut config = ClientConfig::new("test-key");
    config.base_url = server.url();
    config.timeout = Duration::from_secs(5);
    CompletionClient::new(config).unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest::new("Você é um radiologista.", "Exame: TC Tórax", "test/model", 0.3, 2000)
        .unwrap()
}

#[tokio::test]
async fn returns_first_choice_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_header("x-title", "Laudos.AI")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "test/model",
            "max_tokens": 2000,
            "messages": [
                { "role": "system", "content": "Você é um radiologista." },
                { "role": "user", "content": "Exame: TC Tórax" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"choices":[{"message":{"content":"primeiro"}},{"message":{"content":"segundo"}}]}"#,
        )
        .create_async()
        .await;

    let result = client_for(&server).complete(&request()).await.unwrap();

    assert_eq!(result.text.as_deref(), Some("primeiro"));
    mock.assert_async().await;
}

#[tokio::test]
async fn omits_system_message_when_prompt_empty() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "messages": [{ "role": "user", "content": "classifique" }]
        })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"Lungs"}}]}"#)
        .create_async()
        .await;

    let req = CompletionRequest::new("", "classifique", "test/model", 0.3, 50).unwrap();
    let result = client_for(&server).complete(&req).await.unwrap();

    assert_eq!(result.text.as_deref(), Some("Lungs"));
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_surfaces_as_upstream_with_status_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let err = client_for(&server).complete(&request()).await.unwrap_err();

    match err {
        CompletionError::Upstream {
            status,
            ref status_text,
        } => {
            assert_eq!(status, 503);
            assert_eq!(status_text, "Service Unavailable");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn unauthorized_is_not_transient() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .create_async()
        .await;

    let err = client_for(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::Upstream { status: 401, .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = client_for(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}

#[tokio::test]
async fn json_without_choices_is_malformed() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"id":"gen-1"}"#)
        .create_async()
        .await;

    let err = client_for(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_content_is_absent_not_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":null}}]}"#)
        .create_async()
        .await;

    let result = client_for(&server).complete(&request()).await.unwrap();
    assert_eq!(result.text, None);
}

#[tokio::test]
async fn empty_choices_is_absent() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let result = client_for(&server).complete(&request()).await.unwrap();
    assert_eq!(result.text, None);
}

#[tokio::test]
async fn empty_content_is_kept() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":""}}]}"#)
        .create_async()
        .await;

    let result = client_for(&server).complete(&request()).await.unwrap();
    assert_eq!(result.text.as_deref(), Some(""));
}

#[test]
fn rejects_empty_api_key() {
    let err = CompletionClient::new(ClientConfig::new("")).unwrap_err();
    assert!(matches!(err, CompletionError::Config(_)));
}

#[test]
fn endpoint_joins_base_url_without_double_slash() {
    let mut config = ClientConfig::new("k");
    config.base_url = "http://localhost:9999/api/v1/".to_string();
    let client = CompletionClient::new(config).unwrap();
    assert_eq!(client.endpoint(), "http://localhost:9999/api/v1/chat/completions");
}

#[tokio::test]
async fn silent_upstream_times_out_as_transient() {
    // Accepts the connection and never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let holder = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let mut config = ClientConfig::new("test-key");
    config.base_url = format!("http://{addr}");
    config.timeout = Duration::from_millis(200);
    let client = CompletionClient::new(config).unwrap();

    let err = client.complete(&request()).await.unwrap_err();

    assert!(matches!(err, CompletionError::Timeout), "got {err:?}");
    assert!(err.is_transient());
    holder.abort();
}
