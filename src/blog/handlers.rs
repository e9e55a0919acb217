//! Blog post handlers.
//!
//! Every mutating handler walks the same chain: authenticate (middleware)
//! -> load the post (404 if absent) -> ownership check (403 if not the
//! owner) -> apply. Failures are terminal for the request.

use axum::{
    Extension, Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::middleware::CurrentUser;
use crate::blog::authorize_owner;
use crate::core_types::PostId;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse};
use crate::store::{Post, PostStore};

/// Create/update blog request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostBody {
    /// Post text, required, at most 500 characters
    #[validate(length(min = 1, max = 500, message = "Text must be 1 to 500 characters"))]
    #[schema(example = "My first blog-text")]
    pub text: String,
}

/// Blog list response data
#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub count: usize,
    pub data: Vec<Post>,
}

fn parse_post_id(raw: &str) -> Result<PostId, ApiError> {
    // An unparseable id cannot name any post; report it the same as a
    // missing one.
    PostId::parse(raw).map_err(|_| ApiError::not_found(raw))
}

/// Create a new blog post
///
/// POST /api/blogs
#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = PostBody,
    responses(
        (status = 201, description = "Blog created", body = ApiResponse<Post>),
        (status = 400, description = "Invalid body"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<PostBody>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // Owner is always the authenticated creator.
    let post = state.posts.insert(&body.text, current.0.id);

    tracing::info!(post_id = %post.id, user_id = %current.0.id, "blog created");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(post))))
}

/// List all blog posts
///
/// GET /api/blogs
#[utoipa::path(
    get,
    path = "/api/blogs",
    responses(
        (status = 200, description = "All blogs, sorted by text", body = PostListResponse)
    ),
    tag = "Blog"
)]
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Json<PostListResponse> {
    let posts = state.posts.list();
    Json(PostListResponse {
        success: true,
        count: posts.len(),
        data: posts,
    })
}

/// Get a single blog post
///
/// GET /api/blogs/{id}
#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog post id")),
    responses(
        (status = 200, description = "The blog", body = ApiResponse<Post>),
        (status = 404, description = "Blog not found")
    ),
    tag = "Blog"
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post_id = parse_post_id(&id)?;
    let post = state.posts.get(post_id).ok_or(ApiError::not_found(&id))?;
    Ok(Json(ApiResponse::success(post)))
}

/// Update a blog post (owner only)
///
/// PUT /api/blogs/{id}
#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog post id")),
    request_body = PostBody,
    responses(
        (status = 200, description = "Updated blog", body = ApiResponse<Post>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Blog not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<PostBody>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let post_id = parse_post_id(&id)?;
    let post = state.posts.get(post_id).ok_or(ApiError::not_found(&id))?;

    authorize_owner(current.0.id, post.user)?;

    let updated = state
        .posts
        .update_text(post_id, &body.text)
        .ok_or(ApiError::not_found(&id))?;

    Ok(Json(ApiResponse::success(updated)))
}

/// Delete a blog post (owner only)
///
/// DELETE /api/blogs/{id}
#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = String, Path, description = "Blog post id")),
    responses(
        (status = 200, description = "Deleted blog", body = ApiResponse<Post>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Blog not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post_id = parse_post_id(&id)?;
    let post = state.posts.get(post_id).ok_or(ApiError::not_found(&id))?;

    authorize_owner(current.0.id, post.user)?;

    let removed = state.posts.remove(post_id).ok_or(ApiError::not_found(&id))?;

    tracing::info!(post_id = %post_id, user_id = %current.0.id, "blog deleted");
    Ok(Json(ApiResponse::success(removed)))
}

/// Upload a photo for a blog post (owner only)
///
/// PUT /api/blogs/{id}/photo
#[utoipa::path(
    put,
    path = "/api/blogs/{id}/photo",
    params(("id" = String, Path, description = "Blog post id")),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored filename", body = ApiResponse<String>),
        (status = 400, description = "Missing, non-image or oversized file"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Blog not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let post_id = parse_post_id(&id)?;
    let post = state.posts.get(post_id).ok_or(ApiError::not_found(&id))?;

    authorize_owner(current.0.id, post.user)?;

    let mut field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .ok_or_else(|| ApiError::BadRequest("Please upload a file".to_string()))?;

    let is_image = field
        .content_type()
        .map(|ct| ct.starts_with("image/"))
        .unwrap_or(false);
    if !is_image {
        return Err(ApiError::BadRequest(
            "Please upload an image file".to_string(),
        ));
    }

    let ext = field
        .file_name()
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    // Stream the field in chunks; stop reading the moment the cap is
    // crossed instead of buffering the whole part first.
    let max = state.upload.max_file_bytes;
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if (bytes.len() + chunk.len()) as u64 > max {
            return Err(ApiError::BadRequest(format!(
                "Please upload an image less than {}",
                max
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    let filename = persist_photo(&state.posts, &state.upload.dir, post_id, &ext, &bytes).await?;

    tracing::info!(post_id = %post_id, file = %filename, "photo uploaded");
    Ok(Json(ApiResponse::success(filename)))
}

/// Write the photo to disk, then record the filename on the post.
///
/// The post can be deleted between the ownership check and here; in that
/// case the freshly written file is removed again so nothing is left
/// orphaned in the upload directory.
async fn persist_photo(
    posts: &PostStore,
    dir: &str,
    post_id: PostId,
    ext: &str,
    bytes: &[u8],
) -> Result<String, ApiError> {
    let filename = format!("photo_{}{}", post_id, ext);
    let dest = std::path::Path::new(dir).join(&filename);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Internal(format!("upload dir: {}", e)))?;
    tokio::fs::write(&dest, bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("file write: {}", e)))?;

    if posts.set_photo(post_id, &filename).is_none() {
        let _ = tokio::fs::remove_file(&dest).await;
        return Err(ApiError::not_found(post_id));
    }

    Ok(filename)
}
