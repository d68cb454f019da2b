use laudos_completion::error::CompletionError;
use laudos_core::error::CoreError;
use laudos_core::models::payload::ErrorPayload;
use thiserror::Error;

use crate::stage::Stage;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    Configuration(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{stage} request failed: {source}")]
    Completion {
        stage: Stage,
        #[source]
        source: CompletionError,
    },

    #[error("No content in response")]
    EmptyCompletion { stage: Stage },

    #[error("Invalid section returned: {0}")]
    InvalidSection(String),
}

impl ReportError {
    pub fn missing_system_prompt() -> Self {
        ReportError::Configuration(
            "RADIOLOGY_SYSTEM_PROMPT is not set in the environment variables".to_string(),
        )
    }

    /// The stage whose completion call failed, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ReportError::Completion { stage, .. } | ReportError::EmptyCompletion { stage } => {
                Some(*stage)
            }
            _ => None,
        }
    }

    /// Convert to the `{ error, details? }` failure shape.
    ///
    /// `error` is the message shown to the user; `details` carries the
    /// technical cause for logs and diagnostics.
    pub fn to_payload(&self) -> ErrorPayload {
        let details = match self {
            ReportError::Configuration(_) | ReportError::InvalidInput(_) => None,
            ReportError::Completion { stage, source } => {
                Some(format!("stage={stage:?}: {source:?}"))
            }
            ReportError::EmptyCompletion { stage } => Some(format!(
                "stage={stage:?}: completion service returned no message content"
            )),
            ReportError::InvalidSection(s) => Some(format!("model replied {s:?}")),
        };

        ErrorPayload {
            error: self.to_string(),
            details,
        }
    }
}

impl From<CoreError> for ReportError {
    fn from(e: CoreError) -> Self {
        ReportError::InvalidInput(e.to_string())
    }
}
