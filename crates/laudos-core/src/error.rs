use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("temperature must be within [0, 1], got {0}")]
    InvalidTemperature(f32),

    #[error("max_tokens must be positive")]
    InvalidMaxTokens,

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unknown report section: {0}")]
    UnknownSection(String),
}
