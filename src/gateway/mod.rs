//! HTTP gateway: router assembly and server loop.

pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;

use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::middleware::auth_middleware;
use crate::config::GatewayConfig;
use state::AppState;
use types::ApiResponse;

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    pub timestamp_ms: u64,
}

/// Liveness probe; no auth, no store access.
async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    Json(ApiResponse::success(HealthResponse { timestamp_ms: now_ms }))
}

/// Build the full application router.
///
/// Blog reads are public; registration/login mint tokens; every mutating
/// blog route sits behind the auth middleware, which rejects the request
/// before any handler or store lookup runs.
pub fn build_router(state: Arc<AppState>) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(crate::auth::handlers::register))
        .route("/login", post(crate::auth::handlers::login));

    let public_blog_routes = Router::new()
        .route("/", get(crate::blog::handlers::list_posts))
        .route("/{id}", get(crate::blog::handlers::get_post));

    let protected_blog_routes = Router::new()
        .route("/", post(crate::blog::handlers::create_post))
        .route("/{id}", put(crate::blog::handlers::update_post))
        .route("/{id}", delete(crate::blog::handlers::delete_post))
        .route("/{id}/photo", put(crate::blog::handlers::upload_photo))
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest(
            "/api/blogs",
            public_blog_routes.merge(protected_blog_routes),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start the HTTP server and serve until shutdown.
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API docs: http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
