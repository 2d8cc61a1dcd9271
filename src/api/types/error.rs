//! Structured error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const CODE_BAD_REQUEST: &str = "BAD_REQUEST";
pub const CODE_API_CHAIN_CALL_ERROR: &str = "API_CHAIN_CALL_ERROR";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_SERVER_ERROR";

pub const MESSAGE_BAD_INPUT: &str = "Bad input from client";
pub const MESSAGE_CHAIN_CALL_ERROR: &str = "Error on chain call to other API";
pub const MESSAGE_NOT_FOUND: &str = "Resource not found";
pub const MESSAGE_INTERNAL_ERROR: &str = "Internal server error";

/// Error envelope: `{"error": {...}, "timestamp": <epoch ms>}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    pub reason: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    code: code.into(),
                    message: message.into(),
                    reason: reason.into(),
                },
                timestamp: Utc::now().timestamp_millis(),
            },
        }
    }

    /// Bad input from client
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, CODE_BAD_REQUEST, MESSAGE_BAD_INPUT, reason)
    }

    /// A peer call in a chain failed
    pub fn chain_call(reason: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            CODE_API_CHAIN_CALL_ERROR,
            MESSAGE_CHAIN_CALL_ERROR,
            reason,
        )
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, CODE_NOT_FOUND, MESSAGE_NOT_FOUND, reason)
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            CODE_INTERNAL_ERROR,
            MESSAGE_INTERNAL_ERROR,
            reason,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Downstream { .. } => Self::chain_call(err.to_string()),
            DomainError::Storage { message } => Self::internal(message),
            DomainError::Template { message } => Self::internal(message),
            DomainError::Internal { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.code, self.response.error.reason
        )
    }
}

impl std::error::Error for ApiError {}
