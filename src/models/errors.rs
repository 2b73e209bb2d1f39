//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so log lines and API responses
//! can be correlated.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - API_xxx: API errors
//! - CFG_xxx: Configuration errors
//! - SCHEMA_xxx: Power BI schema errors
//! - DAX_xxx: Query generation errors
//! - GROQ_xxx: Chat-completion upstream errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format or missing field
    ApiBadRequest,
    /// Resource not found
    ApiNotFound,
    /// Optional capability is not available in this process
    ApiServiceUnavailable,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Missing API key
    ConfigMissingApiKey,

    // ============================================
    // Schema Errors
    // ============================================
    /// Schema file could not be read
    SchemaReadFailed,
    /// Schema file is not valid JSON
    SchemaParseFailed,
    /// Schema document does not have the expected shape
    SchemaInvalid,

    // ============================================
    // Query generation Errors
    // ============================================
    /// Question is present but is not text
    DaxInvalidQuestion,

    // ============================================
    // Chat-completion upstream Errors
    // ============================================
    /// Transport-level failure talking to Groq
    GroqRequestFailed,
    /// Groq answered with a non-2xx status
    GroqBadStatus,
    /// Groq response body did not match the chat-completion shape
    GroqInvalidResponse,
    /// External service timeout
    ExternalTimeout,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiNotFound => "API_NOT_FOUND",
            Self::ApiServiceUnavailable => "API_SERVICE_UNAVAILABLE",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigMissingApiKey => "CFG_MISSING_API_KEY",

            Self::SchemaReadFailed => "SCHEMA_READ_FAILED",
            Self::SchemaParseFailed => "SCHEMA_PARSE_FAILED",
            Self::SchemaInvalid => "SCHEMA_INVALID",

            Self::DaxInvalidQuestion => "DAX_INVALID_QUESTION",

            Self::GroqRequestFailed => "GROQ_REQUEST_FAILED",
            Self::GroqBadStatus => "GROQ_BAD_STATUS",
            Self::GroqInvalidResponse => "GROQ_INVALID_RESPONSE",
            Self::ExternalTimeout => "EXTERNAL_TIMEOUT",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest => 400,
            Self::ApiNotFound => 404,
            Self::ApiServiceUnavailable => 503,
            Self::GroqBadStatus | Self::GroqRequestFailed | Self::GroqInvalidResponse => 502,
            Self::ExternalTimeout => 504,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// API resource not found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiNotFound, msg)
    }

    /// Optional capability disabled at startup
    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiServiceUnavailable, msg)
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }

    /// Missing API key
    pub fn missing_api_key(key_name: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissingApiKey,
            format!("{} not found in environment variables", key_name),
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(key_name: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key_name, value),
        )
    }

    /// Schema document has an unexpected shape
    pub fn invalid_schema(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SchemaInvalid, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::ExternalTimeout
        } else if err.is_status() {
            ErrorCode::GroqBadStatus
        } else if err.is_decode() {
            ErrorCode::GroqInvalidResponse
        } else {
            ErrorCode::GroqRequestFailed
        };
        let message = err.to_string();
        Self::with_source(code, message, err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let message = format!("JSON parse error: {}", err);
        Self::with_source(ErrorCode::SchemaParseFailed, message, err)
    }
}

// ============================================
// HTTP response mapping
// ============================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = self.code_str(), "Unexpected error: {}", self.message);
            json!({ "error": "Internal server error", "message": self.message })
        } else {
            json!({ "error": self.message, "status_code": status.as_u16() })
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::missing_api_key("GROQ_API_KEY");
        assert_eq!(err.code, ErrorCode::ConfigMissingApiKey);
        assert_eq!(err.code_str(), "CFG_MISSING_API_KEY");
        assert_eq!(err.message, "GROQ_API_KEY not found in environment variables");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::ApiNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ApiServiceUnavailable.http_status(), 503);
        assert_eq!(ErrorCode::SchemaInvalid.http_status(), 500);
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::bad_request("question is required");
        assert_eq!(err.to_string(), "[API_BAD_REQUEST] question is required");
    }

    #[tokio::test]
    async fn test_client_error_body_shape() {
        let response = AppError::bad_request("question is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("parse JSON");
        assert_eq!(json["error"], "question is required");
        assert_eq!(json["status_code"], 400);
    }

    #[tokio::test]
    async fn test_internal_error_body_shape() {
        let response = AppError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("parse JSON");
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["message"], "boom");
    }
}
