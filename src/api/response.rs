//! Response types for the Parafiscal Calculation Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    fn config_error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::with_details("CONFIG_ERROR", message, details)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => Self::internal(ApiError::config_error(
                "Configuration error",
                format!("Configuration file not found: {}", path),
            )),
            EngineError::ConfigParseError { path, message } => {
                Self::internal(ApiError::config_error(
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ))
            }
            EngineError::InvalidConfig { message } => {
                Self::internal(ApiError::config_error("Invalid configuration", message))
            }
            EngineError::NoMatchingBracket { pool } => Self::internal(ApiError::config_error(
                "Fee schedule error",
                format!("No fee bracket covers a pool of {}", pool),
            )),
            EngineError::InvalidEmployee {
                employee_id,
                field,
                message,
            } => Self::bad_request(ApiError::with_details(
                "INVALID_EMPLOYEE",
                format!(
                    "Invalid employee '{}' field '{}': {}",
                    employee_id, field, message
                ),
                "The employee data contains invalid information",
            )),
            EngineError::InvalidInput { field, message } => {
                Self::bad_request(ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input '{}': {}", field, message),
                    "A calculation input is outside its allowed range",
                ))
            }
            EngineError::InvalidPercentage { value } => Self::bad_request(ApiError::with_details(
                "INVALID_PERCENTAGE",
                format!("Salary percentage must be between 0 and 100, got {}", value),
                "salary_percentage is expressed on a 0-100 scale",
            )),
        }
    }
}
