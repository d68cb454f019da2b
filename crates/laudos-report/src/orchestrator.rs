//! Sub-agent orchestration for report generation.
//!
//! # Pipeline
//!
//! 1. Refuse to start when no radiology system prompt is configured.
//! 2. Chain-of-thought analysis of the findings (`thinking`).
//! 3. Final narrative report from the findings and the system prompt. A
//!    reply without content aborts the whole run.
//! 4. A first insights pass over the raw report. Its output is discarded
//!    but a failure still aborts the run.
//! 5. The `<planejamento_laudo>` block is split off the report.
//! 6. The `<logica>` block is pulled out of `thinking` (empty if missing).
//! 7. Insights again, from the report without its planning block and with
//!    the exam type. This pass is the one returned.
//! 8. Impressions, differential diagnosis and follow-up recommendations,
//!    each only when requested.
//! 9. Assembly into a [`ReportPayload`].
//!
//! Steps 2 to 7 are sequential because each prompt is built from the
//! previous output. The optional calls in step 8 only depend on the report
//! and run concurrently; the first failure among them fails the run and
//! drops the others. No partial payload is ever returned.

use laudos_completion::service::CompletionService;
use laudos_core::models::completion::CompletionRequest;
use laudos_core::models::payload::{GenerateReportRequest, ReportPayload};
use tracing::{debug, error, info};

use crate::assemble::{DraftReport, ReportSections, assemble, extract_logica};
use crate::error::ReportError;
use crate::prompts::{self, Prompt};
use crate::stage::Stage;

pub const DEFAULT_REPORT_MODEL: &str = "anthropic/claude-3.5-sonnet-20241022:beta";

/// Per-deployment settings for report generation.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Radiology system prompt for the final report. `None` (or blank)
    /// makes every generation fail with a configuration error.
    pub system_prompt: Option<String>,
    pub model: String,
}

impl ReportSettings {
    pub fn new(system_prompt: Option<String>) -> Self {
        Self {
            system_prompt,
            model: DEFAULT_REPORT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Runs the report pipeline against a completion service.
pub struct ReportGenerator<S> {
    service: S,
    settings: ReportSettings,
}

impl<S: CompletionService> ReportGenerator<S> {
    pub fn new(service: S, settings: ReportSettings) -> Self {
        Self { service, settings }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Generate a report. Nothing partial is returned on failure; the error
    /// converts to the `{ error, details }` shape with
    /// [`ReportError::to_payload`].
    pub async fn generate(
        &self,
        request: &GenerateReportRequest,
    ) -> Result<ReportPayload, ReportError> {
        let result = self.pipeline(request).await;
        if let Err(e) = &result {
            error!(error = %e, stage = ?e.stage(), "report generation failed");
        }
        result
    }

    async fn pipeline(
        &self,
        request: &GenerateReportRequest,
    ) -> Result<ReportPayload, ReportError> {
        let system_prompt = self
            .settings
            .system_prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(ReportError::missing_system_prompt)?;
        request.validate()?;

        let findings = request.findings.as_str();
        let exam_type = request.exam_type.as_str();
        let options = request.options;

        info!(
            exam_type,
            findings_len = findings.len(),
            impressions = options.include_impressions,
            differential_diagnosis = options.include_differential_diagnosis,
            follow_up = options.include_follow_up_recommendations,
            "starting report generation"
        );

        let thinking = self
            .run(Stage::ChainOfThought, prompts::chain_of_thought(findings, exam_type))
            .await?;

        let report_text = self
            .run(
                Stage::FinalReport,
                prompts::final_report(findings, exam_type, system_prompt),
            )
            .await?;
        // First insights pass over the unparsed report. Its text is
        // superseded below; only its failure matters.
        self.run(Stage::Insights, prompts::insights(&report_text, ""))
            .await?;

        let draft = DraftReport::from_completion(&report_text);
        if let Some(planning) = &draft.planning {
            debug!(planning_len = planning.len(), "planning block removed from report");
        }

        let logica = extract_logica(&thinking);

        let insights = self
            .run(Stage::Insights, prompts::insights(&draft.report, exam_type))
            .await?;

        let report = draft.report.as_str();
        let (impressions, differential_diagnosis, follow_up_recommendations) = tokio::try_join!(
            self.run_if(options.include_impressions, Stage::Impressions, || {
                prompts::impressions(report, exam_type)
            }),
            self.run_if(
                options.include_differential_diagnosis,
                Stage::DifferentialDiagnosis,
                || prompts::differential_diagnosis(report, exam_type),
            ),
            self.run_if(
                options.include_follow_up_recommendations,
                Stage::FollowUpRecommendations,
                || prompts::follow_up_recommendations(report, exam_type),
            )
        )?;

        let payload = assemble(
            ReportSections {
                thinking,
                report: draft.report,
                insights,
                logica,
                impressions,
                differential_diagnosis,
                follow_up_recommendations,
            },
            options,
        );

        info!(exam_type, report_len = payload.report.len(), "report generation complete");

        Ok(payload)
    }

    async fn run(&self, stage: Stage, prompt: Prompt) -> Result<String, ReportError> {
        run_stage(&self.service, &self.settings.model, stage, prompt).await
    }

    async fn run_if(
        &self,
        enabled: bool,
        stage: Stage,
        prompt: impl FnOnce() -> Prompt,
    ) -> Result<Option<String>, ReportError> {
        if !enabled {
            return Ok(None);
        }
        self.run(stage, prompt()).await.map(Some)
    }
}

/// One completion call for `stage`. Absent text is an error.
pub(crate) async fn run_stage<S: CompletionService + ?Sized>(
    service: &S,
    model: &str,
    stage: Stage,
    prompt: Prompt,
) -> Result<String, ReportError> {
    let request = CompletionRequest::new(
        prompt.system,
        prompt.user,
        model,
        stage.temperature(),
        stage.max_tokens(),
    )?;

    debug!(stage = ?stage, model, "running stage");

    let result = service
        .complete(&request)
        .await
        .map_err(|source| ReportError::Completion { stage, source })?;

    result
        .into_text()
        .ok_or(ReportError::EmptyCompletion { stage })
}
