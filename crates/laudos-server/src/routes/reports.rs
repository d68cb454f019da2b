use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use laudos_core::models::block::StructuredBlock;
use laudos_core::models::payload::{GenerateReportRequest, ReportPayload};
use laudos_report::parser::TagParser;

use crate::error::ApiError;
use crate::state::AppState;

/// Run the full sub-agent pipeline for one set of findings.
pub async fn generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<Json<ReportPayload>, ApiError> {
    let payload = state.generator.generate(&req).await?;
    Ok(Json(payload))
}

#[derive(Deserialize)]
pub struct StructureRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tag: String,
}

#[derive(Serialize)]
pub struct StructureResponse {
    pub blocks: Vec<StructuredBlock>,
}

/// Split tagged model output into blocks for the editor.
pub async fn structure_blocks(
    Json(req): Json<StructureRequest>,
) -> Result<Json<StructureResponse>, ApiError> {
    let tag = req.tag.trim();
    if tag.is_empty() {
        return Err(ApiError::bad_request("No tag provided"));
    }

    let blocks = TagParser::default().parse(&req.text, tag);
    tracing::debug!(tag, count = blocks.len(), "structured blocks");

    Ok(Json(StructureResponse { blocks }))
}
