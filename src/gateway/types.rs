//! Wire types shared by all handlers.
//!
//! Every response body carries `success`; failures add `error` with a
//! client-safe message. Status codes follow the error taxonomy:
//! 400 conflict/validation, 401 unauthenticated, 403 forbidden,
//! 404 not found, 500 internal.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::blog::OwnershipError;

/// Success response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Always true on the success path
    #[schema(example = true)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

/// Error body: `{"success": false, "error": "<message>"}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Invalid credentials")]
    pub error: String,
}

/// Terminal request failures. Each maps to exactly one status code;
/// none are retried by this layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Duplicate field value entered")]
    DuplicateEmail,
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not authorized to access this route")]
    Unauthenticated,
    /// Authenticated, but not the owner of the target resource.
    #[error("Not authorized to modify this blog")]
    Forbidden,
    #[error("Blog not found with id of {0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    /// Detail is logged server-side, never sent to the client.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound(id.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateEmail | ApiError::Validation(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!("internal error: {}", detail);
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::DuplicateEmail => ApiError::DuplicateEmail,
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Unauthenticated => ApiError::Unauthenticated,
            AuthError::Internal => ApiError::Internal("auth service failure".to_string()),
        }
    }
}

impl From<OwnershipError> for ApiError {
    fn from(_: OwnershipError) -> Self {
        ApiError::Forbidden
    }
}
