use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::UploadConfig;
use crate::store::{PostStore, UserStore};

/// Shared application state.
///
/// Everything here is constructed once at startup and immutable
/// afterwards; the stores mutate internally but the handles never change.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub posts: Arc<PostStore>,
    pub auth: Arc<AuthService>,
    pub upload: UploadConfig,
}

impl AppState {
    pub fn new(
        users: Arc<UserStore>,
        posts: Arc<PostStore>,
        auth: Arc<AuthService>,
        upload: UploadConfig,
    ) -> Self {
        Self {
            users,
            posts,
            auth,
            upload,
        }
    }
}
