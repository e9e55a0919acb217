//! Resource store for blog posts.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core_types::{PostId, UserId};

/// Filename recorded on posts without an uploaded photo.
pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

/// A blog post document.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Post {
    pub id: PostId,
    /// Post body, at most 500 characters.
    pub text: String,
    /// Stored photo filename, `no-photo.jpg` until one is uploaded.
    pub photo: String,
    pub created_at: DateTime<Utc>,
    /// Owner identity, set at creation and never reassigned.
    pub user: UserId,
}

/// Post store. Mutations do not serialize against each other here;
/// ownership is re-verified per call by the handlers instead.
pub struct PostStore {
    posts: DashMap<PostId, Post>,
}

impl PostStore {
    pub fn new() -> Self {
        Self {
            posts: DashMap::new(),
        }
    }

    /// Insert a new post owned by `owner`.
    pub fn insert(&self, text: &str, owner: UserId) -> Post {
        let post = Post {
            id: PostId::new(),
            text: text.to_string(),
            photo: DEFAULT_PHOTO.to_string(),
            created_at: Utc::now(),
            user: owner,
        };
        self.posts.insert(post.id, post.clone());
        post
    }

    pub fn get(&self, id: PostId) -> Option<Post> {
        self.posts.get(&id).map(|p| p.clone())
    }

    /// All posts, sorted by text ascending.
    pub fn list(&self) -> Vec<Post> {
        let mut all: Vec<Post> = self.posts.iter().map(|p| p.clone()).collect();
        all.sort_by(|a, b| a.text.cmp(&b.text));
        all
    }

    pub fn update_text(&self, id: PostId, text: &str) -> Option<Post> {
        let mut entry = self.posts.get_mut(&id)?;
        entry.text = text.to_string();
        Some(entry.clone())
    }

    pub fn set_photo(&self, id: PostId, filename: &str) -> Option<Post> {
        let mut entry = self.posts.get_mut(&id)?;
        entry.photo = filename.to_string();
        Some(entry.clone())
    }

    pub fn remove(&self, id: PostId) -> Option<Post> {
        self.posts.remove(&id).map(|(_, post)| post)
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}
