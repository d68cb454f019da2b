use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service returned {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("completion request failed: {0}")]
    Transport(String),

    #[error("completion request timed out")]
    Timeout,

    #[error("completion client config error: {0}")]
    Config(String),
}

impl CompletionError {
    /// Whether a retry has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            CompletionError::Upstream { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            CompletionError::Transport(_) | CompletionError::Timeout => true,
            CompletionError::MalformedResponse(_) | CompletionError::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CompletionError::Timeout
        } else if e.is_decode() {
            CompletionError::MalformedResponse(e.to_string())
        } else if e.is_builder() {
            CompletionError::Config(e.to_string())
        } else {
            CompletionError::Transport(e.to_string())
        }
    }
}
