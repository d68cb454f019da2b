use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use laudos_core::models::section::ReportSection;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct ClassifyResponse {
    pub section: ReportSection,
}

pub async fn classify_section(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let section = state.assistant.classify_section(&req.text).await?;
    Ok(Json(ClassifyResponse { section }))
}

#[derive(Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub text: String,
    pub section: Option<String>,
}

#[derive(Serialize)]
pub struct EnhanceResponse {
    pub text: String,
}

pub async fn enhance_text(
    State(state): State<AppState>,
    Json(req): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, ApiError> {
    let text = state
        .assistant
        .enhance_text(&req.text, req.section.as_deref())
        .await?;
    Ok(Json(EnhanceResponse { text }))
}
