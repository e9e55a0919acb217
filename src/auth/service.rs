//! Authentication service: registration, login, token resolution.

use std::sync::Arc;
use thiserror::Error;

use crate::config::AuthConfig;
use crate::core_types::UserId;
use crate::store::{StoreError, User, UserStore};

use super::password::{PasswordError, PasswordHasher};
use super::token::{TokenError, TokenService};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration conflict on the unique email index.
    #[error("Duplicate field value entered")]
    DuplicateEmail,
    /// Unknown email and wrong password report identically so a caller
    /// cannot enumerate registered accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Missing, malformed or expired token, or the token's user is gone.
    #[error("Not authorized to access this route")]
    Unauthenticated,
    #[error("internal auth failure")]
    Internal,
}

impl From<PasswordError> for AuthError {
    fn from(_: PasswordError) -> Self {
        AuthError::Internal
    }
}

/// Registration/login and bearer-token resolution over the user store.
///
/// Holds the only copies of the signing secret and hashing work factor;
/// both are fixed at construction.
pub struct AuthService {
    users: Arc<UserStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<UserStore>, config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            users,
            hasher: PasswordHasher::new(&config.argon2)?,
            tokens: TokenService::new(&config.jwt_secret, config.token_ttl_secs),
        })
    }

    /// Register a new user and issue a token for the fresh identity.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let password_hash = self.hasher.hash(password)?;

        let user = self
            .users
            .create(name, email, &password_hash)
            .map_err(|e| match e {
                StoreError::DuplicateEmail => AuthError::DuplicateEmail,
            })?;

        let token = self.tokens.issue(user.id).map_err(|_| AuthError::Internal)?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok((user, token))
    }

    /// Verify credentials and mint a token.
    pub fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id).map_err(|_| AuthError::Internal)?;

        tracing::info!(user_id = %user.id, "login ok");
        Ok(token)
    }

    /// Resolve a bearer token to its user.
    ///
    /// Expired and malformed tokens are distinguished here for
    /// diagnostics only; both collapse to `Unauthenticated`.
    pub fn resolve_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            match e {
                TokenError::Expired => tracing::debug!("rejected expired token"),
                TokenError::Invalid => tracing::debug!("rejected invalid token"),
            }
            AuthError::Unauthenticated
        })?;

        let user_id = UserId::parse(&claims.sub).map_err(|_| AuthError::Unauthenticated)?;

        // The token may outlive its user.
        self.users
            .find_by_id(user_id)
            .ok_or(AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Argon2Config;

    fn test_service() -> AuthService {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_secs: 3600,
            argon2: Argon2Config {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            },
        };
        AuthService::new(Arc::new(UserStore::new()), &config).unwrap()
    }

    #[test]
    fn test_register_then_login() {
        let auth = test_service();
        let (user, token) = auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();
        assert!(!token.is_empty());

        let login_token = auth.login("kamil@mail.ru", "123456").unwrap();
        let resolved = auth.resolve_token(&login_token).unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[test]
    fn test_register_duplicate_email() {
        let auth = test_service();
        auth.register("A", "dup@mail.ru", "123456").unwrap();
        let err = auth.register("B", "dup@mail.ru", "abcdef").unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let auth = test_service();
        auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();

        let wrong_password = auth.login("kamil@mail.ru", "badpass").unwrap_err();
        let unknown_email = auth.login("nobody@mail.ru", "123456").unwrap_err();

        // Same variant, same message: no enumeration leak.
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn test_resolve_garbage_token() {
        let auth = test_service();
        let err = auth.resolve_token("garbage").unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let users = Arc::new(UserStore::new());
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_secs: -60,
            argon2: Argon2Config {
                memory_kib: 64,
                iterations: 1,
                parallelism: 1,
            },
        };
        let auth = AuthService::new(users, &config).unwrap();

        let (_, token) = auth.register("Kamil", "kamil@mail.ru", "123456").unwrap();
        let err = auth.resolve_token(&token).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }

    #[test]
    fn test_token_for_vanished_user() {
        // Token signed with the right secret but for an id the store
        // has never seen.
        let auth = test_service();
        let tokens = TokenService::new("test-secret", 3600);
        let token = tokens.issue(UserId::new()).unwrap();

        let err = auth.resolve_token(&token).unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }
}
