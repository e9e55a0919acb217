//! Resource-ownership authorization.
//!
//! A pure comparison between the acting identity and the recorded owner.
//! Handlers call this after loading the resource (so a missing resource
//! reports NotFound, not Forbidden) and before every mutation; the
//! decision is never cached across calls.

use thiserror::Error;

use crate::core_types::UserId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnershipError {
    /// Authenticated, but not the owner of the resource.
    #[error("not the resource owner")]
    Forbidden,
}

/// Allow iff the acting user is the recorded owner.
pub fn authorize_owner(acting: UserId, owner: UserId) -> Result<(), OwnershipError> {
    if acting == owner {
        Ok(())
    } else {
        Err(OwnershipError::Forbidden)
    }
}
