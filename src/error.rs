//! Domain error taxonomy and the API error envelope.
//!
//! Domain errors raised in the customer service propagate unmodified to the
//! API boundary, where each maps 1:1 to an HTTP status code. Every non-2xx
//! response carries the same JSON body shape:
//! `{ "path", "message", "statusCode", "timestamp" }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::customer::store::StoreError;

/// Errors raised by the customer service.
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("customer with id [{0}] not found")]
    NotFound(i64),

    #[error("email already taken")]
    DuplicateEmail,

    #[error("no data changes found")]
    NoChanges,

    #[error("password hashing failed: {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error(transparent)]
    Store(StoreError),
}

impl CustomerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::DuplicateEmail => StatusCode::CONFLICT,
            CustomerError::NoChanges => StatusCode::BAD_REQUEST,
            CustomerError::PasswordHash(_) | CustomerError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for CustomerError {
    fn from(err: StoreError) -> Self {
        match err {
            // A racing insert rejected by the unique constraint surfaces as
            // Conflict, not as an unhandled storage error.
            StoreError::DuplicateEmail => CustomerError::DuplicateEmail,
            other => CustomerError::Store(other),
        }
    }
}

/// JSON body returned for every non-2xx response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub path: String,
    pub message: String,
    pub status_code: u16,
    pub timestamp: DateTime<Utc>,
}

/// A domain or infrastructure error paired with the request path,
/// ready to render as a response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    path: String,
}

impl ApiError {
    pub fn new(err: CustomerError, path: &str) -> Self {
        Self {
            status: err.status_code(),
            message: err.to_string(),
            path: path.to_string(),
        }
    }

    pub fn forbidden(message: impl Into<String>, path: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
            path: path.to_string(),
        }
    }

    pub fn internal(err: anyhow::Error, path: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            path: path.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            path: self.path,
            message: self.message,
            status_code: self.status.as_u16(),
            timestamp: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}
