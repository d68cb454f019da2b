//! Editor assistants: section classification and text enhancement.
//!
//! Both are single completion calls on a cheaper model than the report
//! pipeline.

use laudos_completion::service::CompletionService;
use laudos_core::models::section::ReportSection;
use tracing::{info, warn};

use crate::error::ReportError;
use crate::orchestrator::run_stage;
use crate::prompts;
use crate::stage::Stage;

pub const DEFAULT_ASSIST_MODEL: &str = "deepseek/deepseek-chat";

pub struct Assistant<S> {
    service: S,
    model: String,
}

impl<S: CompletionService> Assistant<S> {
    pub fn new(service: S, model: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
        }
    }

    /// Decide which report section a piece of dictated text belongs to.
    ///
    /// The model must answer with exactly one section name; anything else
    /// is rejected rather than guessed at.
    pub async fn classify_section(&self, text: &str) -> Result<ReportSection, ReportError> {
        if text.trim().is_empty() {
            return Err(ReportError::InvalidInput("No text provided".to_string()));
        }

        let reply = run_stage(
            &self.service,
            &self.model,
            Stage::SectionClassification,
            prompts::classify_section(text),
        )
        .await?;
        let answer = reply.trim();

        match answer.parse::<ReportSection>() {
            Ok(section) => {
                info!(section = %section, "classified text");
                Ok(section)
            }
            Err(_) => {
                warn!(reply = answer, "model returned an unknown section");
                Err(ReportError::InvalidSection(answer.to_string()))
            }
        }
    }

    /// Rewrite text in more professional radiology language.
    pub async fn enhance_text(
        &self,
        text: &str,
        section: Option<&str>,
    ) -> Result<String, ReportError> {
        if text.trim().is_empty() {
            return Err(ReportError::InvalidInput("No text provided".to_string()));
        }

        let reply = run_stage(
            &self.service,
            &self.model,
            Stage::TextEnhancement,
            prompts::enhance_text(text, section),
        )
        .await?;

        Ok(reply.trim().to_string())
    }
}
