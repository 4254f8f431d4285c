//! In-memory repository used by tests and local development.
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PostRepository, RepositoryError};
use crate::post::{slug, NewPost, Post};

#[derive(Default)]
pub struct MemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn unique_slug(posts: &HashMap<Uuid, Post>, title: &str) -> String {
        let base = slug::slugify(title);
        if !posts.values().any(|post| post.slug == base) {
            return base;
        }
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{base}-{}", &suffix[..8])
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepositoryError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Post, RepositoryError> {
        let store = self.store.read().await;
        store.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepositoryError> {
        let mut store = self.store.write().await;
        let stored = Post {
            id: Uuid::new_v4(),
            slug: Self::unique_slug(&store, &post.title),
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
        };
        store.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn replace(&self, id: Uuid, post: Post) -> Result<Post, RepositoryError> {
        let mut store = self.store.write().await;
        if !store.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }
        store.insert(id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        store
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::PostStatus;
    use chrono::{TimeZone, Utc};

    fn draft(title: &str, day: u32) -> NewPost {
        let created = Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap();
        NewPost {
            title: title.to_string(),
            content: "Body".to_string(),
            excerpt: None,
            status: PostStatus::Draft,
            scheduled_for: None,
            created_at: created,
            updated_at: created,
            featured_image: None,
            author: "Ana".to_string(),
        }
    }

    #[tokio::test]
    async fn lists_newest_created_first() {
        let repo = MemoryPostRepository::new();
        repo.insert(draft("Oldest", 1)).await.unwrap();
        repo.insert(draft("Middle", 2)).await.unwrap();
        repo.insert(draft("Newest", 3)).await.unwrap();

        let posts = repo.list_all().await.unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn insert_assigns_id_and_slug() {
        let repo = MemoryPostRepository::new();
        let stored = repo.insert(draft("Hello, World!", 1)).await.unwrap();
        assert_eq!(stored.slug, "hello-world");
        assert_eq!(stored.published_at, None);

        // Same title gets a distinct slug.
        let second = repo.insert(draft("Hello, World!", 2)).await.unwrap();
        assert_ne!(second.id, stored.id);
        assert_ne!(second.slug, stored.slug);
        assert!(second.slug.starts_with("hello-world-"));
    }

    #[tokio::test]
    async fn replace_round_trips_and_misses_are_not_found() {
        let repo = MemoryPostRepository::new();
        let stored = repo.insert(draft("Hello", 1)).await.unwrap();

        let mut edited = stored.clone();
        edited.title = "Hello again".to_string();
        let replaced = repo.replace(stored.id, edited).await.unwrap();
        assert_eq!(replaced.title, "Hello again");
        assert_eq!(repo.get_by_id(stored.id).await.unwrap().title, "Hello again");

        let missing = Uuid::new_v4();
        assert!(matches!(
            repo.replace(missing, stored.clone()).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            repo.get_by_id(missing).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_not_found() {
        let repo = MemoryPostRepository::new();
        let stored = repo.insert(draft("Hello", 1)).await.unwrap();

        repo.delete(stored.id).await.unwrap();
        assert!(matches!(
            repo.delete(stored.id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
