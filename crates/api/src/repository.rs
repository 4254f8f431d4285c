//! Postgres-backed post repository. Maps rows of the `posts` table to the
//! core model; status is stored as text and parsed back on read.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use blog_core::post::{slug, NewPost, Post, PostStatus};
use blog_core::repository::{PostRepository, RepositoryError};

pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Slug derived from the title, suffixed when already taken. Races
    /// between the check and the insert fall to the unique index, which is
    /// acceptable under the last-write-wins model.
    async fn unique_slug(&self, title: &str) -> Result<String, RepositoryError> {
        let base = slug::slugify(title);
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1)")
                .bind(&base)
                .fetch_one(&self.pool)
                .await?;
        if !taken {
            return Ok(base);
        }
        let suffix = Uuid::new_v4().simple().to_string();
        Ok(format!("{base}-{}", &suffix[..8]))
    }
}

fn row_to_post(row: &PgRow) -> Result<Post, sqlx::Error> {
    let status_text: String = row.try_get("status")?;
    let status = PostStatus::parse(&status_text).ok_or_else(|| {
        sqlx::Error::Decode(format!("unknown post status: {status_text}").into())
    })?;
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        content: row.try_get("content")?,
        excerpt: row.try_get("excerpt")?,
        status,
        scheduled_for: row.try_get("scheduled_for")?,
        published_at: row.try_get("published_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        featured_image: row.try_get("featured_image")?,
        author: row.try_get("author")?,
    })
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM posts ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row_to_post(row).map_err(RepositoryError::from))
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Post, RepositoryError> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(row_to_post(&row)?)
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepositoryError> {
        let id = Uuid::new_v4();
        let slug = self.unique_slug(&post.title).await?;

        sqlx::query(
            "INSERT INTO posts \
             (id, title, slug, content, excerpt, status, scheduled_for, \
              published_at, created_at, updated_at, featured_image, author) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, NULL, $8, $9, $10, $11)",
        )
        .bind(id)
        .bind(&post.title)
        .bind(&slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(post.status.as_str())
        .bind(post.scheduled_for)
        .bind(post.created_at)
        .bind(post.updated_at)
        .bind(&post.featured_image)
        .bind(&post.author)
        .execute(&self.pool)
        .await?;

        Ok(Post {
            id,
            slug,
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            status: post.status,
            scheduled_for: post.scheduled_for,
            published_at: None,
            created_at: post.created_at,
            updated_at: post.updated_at,
            featured_image: post.featured_image,
            author: post.author,
        })
    }

    async fn replace(&self, id: Uuid, post: Post) -> Result<Post, RepositoryError> {
        // The slug column is deliberately left out: it is immutable.
        let result = sqlx::query(
            "UPDATE posts SET title = $2, content = $3, excerpt = $4, status = $5, \
             scheduled_for = $6, published_at = $7, updated_at = $8, \
             featured_image = $9, author = $10 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(post.status.as_str())
        .bind(post.scheduled_for)
        .bind(post.published_at)
        .bind(post.updated_at)
        .bind(&post.featured_image)
        .bind(&post.author)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
