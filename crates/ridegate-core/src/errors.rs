//! Application error type.
//!
//! Every service returns `Result<T, AppError>`. Each arm maps to exactly one
//! HTTP status, so handlers can propagate with `?` and the response envelope
//! is built in one place.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::response::ApiResponse;

/// Message returned for every authorization failure.
pub const INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions";

/// Message returned for every unexpected failure. Internal detail is logged only.
pub const SERVER_ERROR: &str = "Server error";

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed, missing or out-of-range input, and duplicate-email conflicts.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but the role lacks the required permission.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    TooManyRequests(String),

    /// Persistence or other unexpected failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Shorthand for the generic 403 used by every permission and role check.
    pub fn insufficient_permissions() -> Self {
        Self::Forbidden(INSUFFICIENT_PERMISSIONS.to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::TooManyRequests(message.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Internal(err) => {
                error!(error = ?err, "Unhandled internal error");
                SERVER_ERROR.to_string()
            }
            other => other.to_string(),
        };

        let body = ApiResponse::<()>::failure(
            message,
            status.canonical_reason().unwrap_or("Error").to_string(),
        );

        (status, Json(body)).into_response()
    }
}
