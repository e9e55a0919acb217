//! Blog post surface: CRUD handlers, photo upload, ownership checks.

pub mod handlers;
pub mod ownership;

pub use ownership::{OwnershipError, authorize_owner};
