//! Authentication and authorization core.
//!
//! - [`password`] - salted argon2 hashing with a configurable work factor
//! - [`token`] - stateless JWT issue/verify
//! - [`service`] - registration, login, token resolution
//! - [`handlers`] - /api/auth endpoints
//! - [`middleware`] - bearer extraction + identity injection

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use middleware::CurrentUser;
pub use password::PasswordHasher;
pub use service::{AuthError, AuthService};
pub use token::{Claims, TokenError, TokenService};
