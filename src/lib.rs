//! Inkpost - a small blog API service
//!
//! User registration/login with stateless JWT bearer tokens, per-user
//! blog-post CRUD with photo attachment, and ownership-based
//! authorization on every mutating operation.
//!
//! # Modules
//!
//! - [`core_types`] - Opaque id newtypes (UserId, PostId)
//! - [`config`] - Process-wide configuration, loaded once at startup
//! - [`logging`] - tracing setup (file + stdout)
//! - [`auth`] - password hashing, token issue/verify, middleware
//! - [`store`] - in-memory document stores (users, posts)
//! - [`blog`] - post CRUD handlers and the ownership authorizer
//! - [`gateway`] - router assembly and the HTTP server loop

pub mod auth;
pub mod blog;
pub mod config;
pub mod core_types;
pub mod gateway;
pub mod logging;
pub mod store;

// Convenient re-exports at crate root
pub use auth::{AuthError, AuthService, CurrentUser, PasswordHasher, TokenService};
pub use blog::{OwnershipError, authorize_owner};
pub use config::AppConfig;
pub use core_types::{PostId, UserId};
pub use store::{Post, PostStore, StoreError, User, UserStore};
