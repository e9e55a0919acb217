//! In-memory document stores
//!
//! The service is specified against store contracts, not a concrete
//! database: `UserStore` backs registration/login, `PostStore` backs the
//! blog CRUD. Both are concurrent maps keyed by opaque ids, so reads for
//! distinct keys run without coordination.

pub mod posts;
pub mod users;

pub use posts::{Post, PostStore};
pub use users::{StoreError, User, UserStore};
