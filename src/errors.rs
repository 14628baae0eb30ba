use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::pipeline::PipelineError;
use crate::services::ProviderError;

pub type CoachResult<T> = Result<T, CoachError>;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Narrative generation unavailable: {0}")]
    Provider(#[from] ProviderError),
    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(String),
}

impl From<ValidationErrors> for CoachError {
    fn from(errors: ValidationErrors) -> Self {
        CoachError::Validation(errors.to_string())
    }
}

// Malformed bodies and query strings get the same error body as failed validation
impl From<JsonRejection> for CoachError {
    fn from(rejection: JsonRejection) -> Self {
        CoachError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for CoachError {
    fn from(rejection: QueryRejection) -> Self {
        CoachError::Validation(rejection.body_text())
    }
}

impl From<PipelineError> for CoachError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Provider(e) => CoachError::Provider(e),
            PipelineError::Serialization(e) => CoachError::Serialization(e),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub error_code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details (optional)
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(code: &str, message: &str, details: serde_json::Value) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.to_string(),
            details: Some(details),
        }
    }
}

impl IntoResponse for CoachError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            CoachError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    "Invalid request data",
                    serde_json::json!({ "errors": errors }),
                ),
            ),
            CoachError::Provider(e) => {
                tracing::error!("Narrative generation failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ApiError::new("NARRATIVE_UNAVAILABLE", &e.to_string()),
                )
            }
            CoachError::Persistence(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("DATABASE_ERROR", "Failed to access storage"),
                )
            }
            CoachError::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("SERIALIZATION_ERROR", "Failed to encode stored data"),
                )
            }
            CoachError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", &format!("{what} not found")),
            ),
        };

        (status, Json(body)).into_response()
    }
}
