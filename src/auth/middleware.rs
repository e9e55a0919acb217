//! Request authentication middleware.
//!
//! Runs before every protected handler: extract the bearer token, verify
//! it, resolve the user, and attach the identity to the request. Any
//! failure short-circuits with a uniform 401 so clients cannot tell a
//! missing header from an expired or forged token.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::ApiError;
use crate::store::User;

/// Authenticated identity attached to the request by the middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthenticated)
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers())?;

    // resolve_token logs expired-vs-invalid internally; the client sees
    // the same 401 either way.
    let user = state.auth.resolve_token(token)?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
