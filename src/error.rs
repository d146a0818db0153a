//! HTTP-facing error type and its JSON rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::error::LinkError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<LinkError> for AppError {
    fn from(err: LinkError) -> Self {
        let message = err.to_string();
        match err {
            LinkError::InvalidUrl(reason) => {
                AppError::bad_request("Invalid URL format", json!({ "reason": reason }))
            }
            LinkError::InvalidCode(reason) => {
                AppError::bad_request("Invalid short code", json!({ "reason": reason }))
            }
            LinkError::DuplicateCode(code) => {
                AppError::conflict("Short code already exists", json!({ "code": code }))
            }
            LinkError::DuplicateUrl { code } => AppError::conflict(message, json!({ "code": code })),
            LinkError::NotFound(code) => {
                AppError::not_found("Short link not found", json!({ "code": code }))
            }
            LinkError::GenerationExhausted { attempts } => {
                tracing::error!(attempts, "Short code space exhausted");
                AppError::internal(
                    "Failed to generate unique code",
                    json!({ "reason": "Too many collisions", "attempts": attempts }),
                )
            }
            LinkError::Storage(reason) => {
                tracing::error!(reason = %reason, "Storage failure");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&errors).unwrap_or_else(|_| json!({})),
        )
    }
}
