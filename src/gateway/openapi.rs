//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::handlers::{AuthResponse, LoginRequest, RegisterRequest, UserPublic};
use crate::blog::handlers::{PostBody, PostListResponse};
use crate::gateway::types::ErrorBody;
use crate::store::Post;

/// Bearer token security scheme for the protected blog routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkpost Blog API",
        version = "1.0.0",
        description = "A small blog service: user registration/login and per-user posts with photo upload.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::blog::handlers::create_post,
        crate::blog::handlers::list_posts,
        crate::blog::handlers::get_post,
        crate::blog::handlers::update_post,
        crate::blog::handlers::delete_post,
        crate::blog::handlers::upload_photo,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserPublic,
        PostBody,
        PostListResponse,
        Post,
        ErrorBody,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Blog", description = "Blog post CRUD and photo upload")
    )
)]
pub struct ApiDoc;
