//! Custom error types for the profile service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::validation::FieldError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the profile service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed caller identity
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Payload failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Unauthorized"}),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Validation failed", "fields": fields}),
            ),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error"}),
            ),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Database error"}),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for profile service results
pub type ApiResult<T> = Result<T, ApiError>;
