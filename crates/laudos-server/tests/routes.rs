use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use laudos_completion::error::CompletionError;
use laudos_completion::service::CompletionService;
use laudos_core::models::completion::{CompletionRequest, CompletionResult};
use laudos_report::assist::Assistant;
use laudos_report::orchestrator::{ReportGenerator, ReportSettings};
use laudos_server::app;
use laudos_server::state::{AppState, SharedService};
use serde_json::{Value, json};
use tower::ServiceExt;

const SYSTEM_PROMPT: &str = "PROMPT-RADIOLOGIA";

/// Answers each report stage with a fixed reply picked from its system
/// prompt. The assistants (empty system prompt) get `assist_reply`.
struct Scripted {
    assist_reply: Option<&'static str>,
    fail_report: bool,
    calls: Mutex<usize>,
}

impl Scripted {
    fn new() -> Self {
        Self {
            assist_reply: Some("Lungs"),
            fail_report: false,
            calls: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CompletionService for Scripted {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        *self.calls.lock().unwrap() += 1;
        let system = request.system_prompt.as_str();
        if system.is_empty() {
            return Ok(CompletionResult {
                text: self.assist_reply.map(str::to_string),
            });
        }
        let text = if system == SYSTEM_PROMPT {
            if self.fail_report {
                return Err(CompletionError::Upstream {
                    status: 503,
                    status_text: "Service Unavailable".to_string(),
                });
            }
            "<planejamento_laudo>plano</planejamento_laudo>LAUDO FINAL"
        } else if system.contains("<logica>") {
            "Análise <logica><step1><title>A</title></step1></logica>"
        } else if system.contains("<insights>") {
            "<insights><insight1><title>I</title></insight1></insights>"
        } else if system.contains("<ddx1>") {
            "<discussion><ddx1><diagnosis>Pneumonia</diagnosis><probability>60%</probability></ddx1></discussion>"
        } else if system.contains("<rec1>") {
            "<discussion><rec1><timeframe>3 meses</timeframe></rec1></discussion>"
        } else {
            "Impressão concisa."
        };
        Ok(CompletionResult::with_text(text))
    }
}

fn state_with(service: Arc<Scripted>, system_prompt: Option<&str>) -> AppState {
    let shared: SharedService = service;
    AppState::new(
        ReportGenerator::new(
            shared.clone(),
            ReportSettings::new(system_prompt.map(str::to_string)),
        ),
        Assistant::new(shared, "test/assist"),
    )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let app = app(state_with(Arc::new(Scripted::new()), Some(SYSTEM_PROMPT)));

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn generate_report_returns_payload() {
    let service = Arc::new(Scripted::new());
    let app = app(state_with(service.clone(), Some(SYSTEM_PROMPT)));

    let req = post_json(
        "/api/generate-report",
        json!({
            "findings": "Nódulo de 8mm",
            "examType": "TC Tórax",
            "includeDifferentialDiagnosis": true
        }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["report"], "LAUDO FINAL");
    assert_eq!(body["logica"], "<step1><title>A</title></step1>");
    assert_eq!(
        body["differentialDiagnosis"],
        "<discussion><ddx1><diagnosis>Pneumonia</diagnosis><probability>60%</probability></ddx1></discussion>"
    );
    assert!(body.get("impressions").is_none());
    assert!(body.get("followUpRecommendations").is_none());
    assert_eq!(service.calls(), 5);
}

#[tokio::test]
async fn generate_report_accepts_portuguese_field_names() {
    let app = app(state_with(Arc::new(Scripted::new()), Some(SYSTEM_PROMPT)));

    let req = post_json(
        "/api/generate-report",
        json!({ "achados": "Nódulo de 8mm", "exame": "TC Tórax" }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn generate_report_missing_findings_is_bad_request() {
    let service = Arc::new(Scripted::new());
    let app = app(state_with(service.clone(), Some(SYSTEM_PROMPT)));

    let req = post_json("/api/generate-report", json!({ "examType": "TC Tórax" }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("findings"));
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn generate_report_without_system_prompt_is_server_error() {
    let service = Arc::new(Scripted::new());
    let app = app(state_with(service.clone(), None));

    let req = post_json(
        "/api/generate-report",
        json!({ "findings": "Nódulo", "examType": "TC Tórax" }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(
        body["error"],
        "RADIOLOGY_SYSTEM_PROMPT is not set in the environment variables"
    );
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn generate_report_upstream_failure_is_bad_gateway() {
    let service = Arc::new(Scripted {
        fail_report: true,
        ..Scripted::new()
    });
    let app = app(state_with(service, Some(SYSTEM_PROMPT)));

    let req = post_json(
        "/api/generate-report",
        json!({ "findings": "Nódulo", "examType": "TC Tórax" }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("Final report request failed"));
    assert!(body["details"].is_string());
    assert!(body.get("report").is_none());
}

#[tokio::test]
async fn structure_returns_blocks() {
    let app = app(state_with(Arc::new(Scripted::new()), Some(SYSTEM_PROMPT)));

    let req = post_json(
        "/api/structure",
        json!({
            "text": "<rec1><timeframe>3 meses</timeframe></rec1><rec2><action>TC</action></rec2>",
            "tag": "rec"
        }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let blocks = body["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["ordinal"], 1);
    assert_eq!(blocks[0]["fields"]["timeframe"], "3 meses");
    assert_eq!(blocks[0]["fields"]["action"], "");
    assert_eq!(blocks[1]["fields"]["action"], "TC");
}

#[tokio::test]
async fn structure_without_tag_is_bad_request() {
    let app = app(state_with(Arc::new(Scripted::new()), Some(SYSTEM_PROMPT)));

    let req = post_json("/api/structure", json!({ "text": "<step1></step1>" }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn classify_section_returns_section() {
    let app = app(state_with(Arc::new(Scripted::new()), Some(SYSTEM_PROMPT)));

    let req = post_json(
        "/api/classify-section",
        json!({ "text": "Opacidade em vidro fosco" }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "section": "Lungs" }));
}

#[tokio::test]
async fn classify_section_with_unknown_reply_is_bad_gateway() {
    let service = Arc::new(Scripted {
        assist_reply: Some("Abdomen"),
        ..Scripted::new()
    });
    let app = app(state_with(service, Some(SYSTEM_PROMPT)));

    let req = post_json("/api/classify-section", json!({ "text": "Fígado" }));
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid section returned: Abdomen");
}

#[tokio::test]
async fn classify_section_without_text_is_bad_request() {
    let service = Arc::new(Scripted::new());
    let app = app(state_with(service.clone(), Some(SYSTEM_PROMPT)));

    let response = app
        .oneshot(post_json("/api/classify-section", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn enhance_text_returns_text() {
    let service = Arc::new(Scripted {
        assist_reply: Some("  Pulmões livres.  "),
        ..Scripted::new()
    });
    let app = app(state_with(service, Some(SYSTEM_PROMPT)));

    let req = post_json(
        "/api/enhance-text",
        json!({ "text": "pulmao ok", "section": "Lungs" }),
    );
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "text": "Pulmões livres." }));
}
