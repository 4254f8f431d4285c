use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use blog_core::post::{validate_for_create, validate_for_update, Post, PostInput};

use crate::error::ApiResult;
use crate::state::AppState;

/// Read-only post routes, open to the public blog.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/api/posts", get(list_posts))
}

/// Mutating post routes, guarded by the editor token.
pub fn editor_routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts", post(create_post))
        .route("/api/posts/{id}", put(update_post).delete(delete_post))
}

/// List all posts, newest created first.
async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    let posts = state.repository().list_all().await?;
    Ok(Json(posts))
}

/// Create a post. Validation happens entirely before the repository is
/// touched; a rejected request persists nothing.
async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<PostInput>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let draft = validate_for_create(input, Utc::now())?;
    let stored = state.repository().insert(draft).await?;
    tracing::info!(id = %stored.id, slug = %stored.slug, "post created");
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Update a post wholesale. The stored post supplies `id`, `slug`, and
/// `createdAt`; the input cannot override them.
async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<PostInput>,
) -> ApiResult<Json<Post>> {
    let existing = state.repository().get_by_id(id).await?;
    let updated = validate_for_update(&existing, input, Utc::now())?;
    let stored = state.repository().replace(id, updated).await?;
    tracing::info!(id = %stored.id, status = stored.status.as_str(), "post updated");
    Ok(Json(stored))
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.repository().delete(id).await?;
    tracing::info!(%id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}
