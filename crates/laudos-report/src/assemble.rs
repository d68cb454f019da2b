//! Final assembly of the report payload from the sub-agent outputs.

use laudos_core::models::payload::{ReportOptions, ReportPayload};

use crate::parser::{extract_section, strip_section};
use crate::sanitize::sanitize;

pub const PLANNING_TAG: &str = "planejamento_laudo";
pub const LOGICA_TAG: &str = "logica";

/// The final-report completion split into its visible and planning parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftReport {
    /// Report text shown to the clinician, planning block removed.
    pub report: String,
    /// The model's `<planejamento_laudo>` scratch content. Kept for logging,
    /// never returned to the editor.
    pub planning: Option<String>,
}

impl DraftReport {
    pub fn from_completion(text: &str) -> Self {
        let (report, planning) = strip_section(text, PLANNING_TAG);
        Self { report, planning }
    }
}

/// Trimmed contents of the `<logica>` block, or empty when the model
/// left it out.
pub fn extract_logica(thinking: &str) -> String {
    extract_section(thinking, LOGICA_TAG)
        .map(|section| section.inner.trim().to_string())
        .unwrap_or_default()
}

/// Raw outputs of every stage that ran.
#[derive(Debug, Clone, Default)]
pub struct ReportSections {
    pub thinking: String,
    pub report: String,
    pub insights: String,
    pub logica: String,
    pub impressions: Option<String>,
    pub differential_diagnosis: Option<String>,
    pub follow_up_recommendations: Option<String>,
}

/// Build the payload.
///
/// Tagged sections (thinking, insights, logica, differential diagnosis,
/// follow-up) are sanitized. The report and impressions are prose and pass
/// through raw. An optional field is present only when its option is on,
/// whatever the sections hold.
pub fn assemble(sections: ReportSections, options: ReportOptions) -> ReportPayload {
    ReportPayload {
        thinking: sanitize(&sections.thinking),
        report: sections.report,
        ai_insights: sanitize(&sections.insights),
        impressions: sections
            .impressions
            .filter(|_| options.include_impressions),
        logica: sanitize(&sections.logica),
        differential_diagnosis: sections
            .differential_diagnosis
            .filter(|_| options.include_differential_diagnosis)
            .map(|text| sanitize(&text)),
        follow_up_recommendations: sections
            .follow_up_recommendations
            .filter(|_| options.include_follow_up_recommendations)
            .map(|text| sanitize(&text)),
    }
}
