use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use laudos_core::models::payload::ErrorPayload;
use laudos_report::error::ReportError;
use thiserror::Error;

/// Unified API error type for all route handlers.
///
/// Every variant renders as an `{ error, details? }` body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(ErrorPayload),
    /// Server-side misconfiguration, e.g. no radiology system prompt.
    Internal(ErrorPayload),
    /// The completion service failed or answered with something unusable.
    BadGateway(ErrorPayload),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(ErrorPayload {
            error: message.into(),
            details: None,
        })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(body) => body,
            ApiError::Internal(body) | ApiError::BadGateway(body) => {
                tracing::error!(
                    status = status.as_u16(),
                    error = %body.error,
                    details = body.details.as_deref().unwrap_or_default(),
                    "request failed"
                );
                body
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        let payload = e.to_payload();
        match e {
            ReportError::InvalidInput(_) => ApiError::BadRequest(payload),
            ReportError::Configuration(_) => ApiError::Internal(payload),
            ReportError::Completion { .. }
            | ReportError::EmptyCompletion { .. }
            | ReportError::InvalidSection(_) => ApiError::BadGateway(payload),
        }
    }
}

/// Start-up configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}
