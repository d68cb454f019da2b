use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which optional sub-agents run for a report. All default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    #[serde(default)]
    pub include_impressions: bool,
    #[serde(default)]
    pub include_differential_diagnosis: bool,
    #[serde(default)]
    pub include_follow_up_recommendations: bool,
}

/// Inbound request for report generation.
///
/// Accepts the Portuguese field names `achados`/`exame` used by older
/// editor builds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    #[serde(default, alias = "achados")]
    pub findings: String,
    #[serde(default, alias = "exame")]
    pub exam_type: String,
    #[serde(flatten)]
    pub options: ReportOptions,
}

impl GenerateReportRequest {
    pub fn new(findings: impl Into<String>, exam_type: impl Into<String>) -> Self {
        Self {
            findings: findings.into(),
            exam_type: exam_type.into(),
            options: ReportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Both `findings` and `exam_type` must contain non-whitespace text.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.findings.trim().is_empty() {
            return Err(CoreError::MissingField("findings".to_string()));
        }
        if self.exam_type.trim().is_empty() {
            return Err(CoreError::MissingField("examType".to_string()));
        }
        Ok(())
    }
}

/// The assembled report returned to the editor.
///
/// Optional fields are omitted from the serialized object entirely when
/// their option was off; they never appear as `null` or `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub thinking: String,
    pub report: String,
    pub ai_insights: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impressions: Option<String>,
    pub logica: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differential_diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_recommendations: Option<String>,
}

/// Failure shape of the report-generation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
