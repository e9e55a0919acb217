//! Password hashing with a per-hash random salt.
//!
//! Argon2id with a configurable work factor. The PHC output string embeds
//! salt and parameters, so verification is self-contained even after the
//! configured work factor changes. Plaintext and digests never reach logs
//! or response bodies.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

use crate::config::Argon2Config;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid argon2 parameters")]
    InvalidParams,
    #[error("password hashing failed")]
    Hash,
}

pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(config: &Argon2Config) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|_| PasswordError::InvalidParams)?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Two calls on the same input produce different digests.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|_| PasswordError::Hash)?;
        Ok(digest.to_string())
    }

    /// Verify a plaintext against a stored digest by recomputation.
    ///
    /// A malformed digest verifies as false rather than erroring; either
    /// way the login fails identically.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match PasswordHash::new(digest) {
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
