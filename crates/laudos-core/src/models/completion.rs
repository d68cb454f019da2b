use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single chat-style request to the completion service.
///
/// Constructed per call and never mutated afterwards. Use
/// [`CompletionRequest::new`] to get range checks on `temperature` and
/// `max_tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System message. An empty string means the request carries only the
    /// user message.
    pub system_prompt: String,
    pub user_prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&temperature) {
            return Err(CoreError::InvalidTemperature(temperature));
        }
        if max_tokens == 0 {
            return Err(CoreError::InvalidMaxTokens);
        }
        Ok(Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            model: model.into(),
            temperature,
            max_tokens,
        })
    }
}

/// Outcome of a successful completion call.
///
/// `text` is `None` when the service answered without any content. That is
/// a different outcome from `Some("")` and callers decide how to treat it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub text: Option<String>,
}

impl CompletionResult {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }

    pub fn into_text(self) -> Option<String> {
        self.text
    }
}
