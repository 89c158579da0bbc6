// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::directory::DirectoryError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Protected role: {0}")]
    ProtectedRole(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            DirectoryError::DuplicateId(id) => AppError::DuplicateId(id),
            DirectoryError::ProtectedRole => {
                AppError::ProtectedRole("the User role cannot be removed".to_string())
            }
            DirectoryError::Persistence(e) => AppError::Persistence(e.to_string()),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::DuplicateId(id) => (StatusCode::CONFLICT, "duplicate_id", Some(id.clone())),
            AppError::ProtectedRole(msg) => {
                (StatusCode::CONFLICT, "protected_role", Some(msg.clone()))
            }
            AppError::Persistence(msg) => {
                // The in-memory mutation has already been applied; this is a
                // durability warning the caller must see.
                tracing::error!(error = %msg, "Persistence error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "persistence_error",
                    Some(msg.clone()),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
