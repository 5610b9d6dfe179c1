//! HTTP error type.
//!
//! Every handler returns `Result<_, AppError>`; the error renders itself as
//! the JSON body the frontend expects for that failure class.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::constants::UPLOAD_FIELD;

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required credential field is missing. Rendered as `{message}` only.
    #[error("{0}")]
    Validation(&'static str),

    /// Analyze was called without a photo in the upload field.
    #[error("No plant photo uploaded")]
    MissingFile { field: &'static str },

    /// Malformed upload (bad multipart framing, unexpected file field).
    #[error("{0}")]
    BadRequest(String),

    /// Upload exceeded the configured body limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The record store or upload storage failed.
    #[error("{message}: {source:#}")]
    Persistence {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Missing photo in the standard upload field.
    pub fn missing_file() -> Self {
        Self::MissingFile {
            field: UPLOAD_FIELD,
        }
    }

    /// Wraps a storage failure with a client-facing summary.
    pub fn persistence(message: &'static str, source: anyhow::Error) -> Self {
        Self::Persistence { message, source }
    }

    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingFile { .. } | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            },
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Validation(message) => {
                debug!(%message, "Rejected credentials");
                json!({ "message": message })
            },
            Self::MissingFile { field } => {
                warn!(%field, "Analyze request without a photo");
                json!({ "success": false, "message": self.to_string() })
            },
            Self::BadRequest(message) | Self::PayloadTooLarge(message) => {
                warn!(%status, %message, "Rejected upload");
                json!({ "success": false, "message": message })
            },
            Self::Persistence { message, source } => {
                error!(error = %format!("{source:#}"), "{message}");
                json!({
                    "success": false,
                    "message": message,
                    "error": format!("{source:#}"),
                })
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::missing_file().status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PayloadTooLarge("big".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::persistence("Database save error", anyhow!("disk full")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_persistence_display_includes_source() {
        let err = AppError::persistence("Database fetch error", anyhow!("connection reset"));
        assert_eq!(err.to_string(), "Database fetch error: connection reset");
    }
}
