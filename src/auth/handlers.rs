//! Registration and login endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::gateway::state::AppState;
use crate::gateway::types::ApiError;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
    #[schema(example = "Kamil")]
    pub name: String,
    #[validate(email(message = "Please add a valid email"))]
    #[schema(example = "kamil@mail.ru")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "123456")]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide an email and a password"))]
    #[schema(example = "kamil@mail.ru")]
    pub email: String,
    #[validate(length(min = 1, message = "Please provide an email and a password"))]
    #[schema(example = "123456")]
    pub password: String,
}

/// Public view of a user, safe to return to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserPublic {
    #[schema(example = "Kamil")]
    pub name: String,
    #[schema(example = "kamil@mail.ru")]
    pub email: String,
}

/// Auth response: bearer token plus, on registration, the public profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = true)]
    pub success: bool,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UserPublic>,
}

/// Register a new user
///
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, token issued", body = AuthResponse),
        (status = 400, description = "Invalid body or duplicate email")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let (user, token) = state.auth.register(&req.name, &req.email, &req.password)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token,
            data: Some(UserPublic {
                name: user.name,
                email: user.email,
            }),
        }),
    ))
}

/// Login an existing user
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token issued", body = AuthResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    req.validate().map_err(|_| {
        ApiError::Validation("Please provide an email and a password".to_string())
    })?;

    let token = state.auth.login(&req.email, &req.password)?;

    Ok(Json(AuthResponse {
        success: true,
        token,
        data: None,
    }))
}
