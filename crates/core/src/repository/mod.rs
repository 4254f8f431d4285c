pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::post::{NewPost, Post};

/// Failures surfaced by a post repository. Misses are distinct from
/// backend faults so the caller can answer 404 versus 500.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("post not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence contract for posts.
///
/// Backends provide atomic single-document operations; there are no
/// cross-item transactions and concurrent edits are last-write-wins.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest created first.
    async fn list_all(&self) -> Result<Vec<Post>, RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Post, RepositoryError>;

    /// Store a new post, assigning its id and a slug derived from the title.
    async fn insert(&self, post: NewPost) -> Result<Post, RepositoryError>;

    /// Replace the stored post under `id` wholesale.
    async fn replace(&self, id: Uuid, post: Post) -> Result<Post, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
