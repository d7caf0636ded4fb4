// src/repositories/post_memory_repo.rs - in-process post store for local runs and tests

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::post::{NewPost, Post, PostChanges};
use crate::repositories::post_repository::RepoError;

#[derive(Clone, Default)]
pub struct MemoryPostRepo {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
    calls: Arc<AtomicUsize>,
}

impl MemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of storage operations served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        self.touch();
        let mut posts = self.posts.write().await;
        if posts.values().any(|p| p.slug == new_post.slug) {
            return Err(RepoError::SlugTaken(new_post.slug));
        }
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author_id: new_post.author_id,
            title: new_post.title,
            slug: new_post.slug,
            published: new_post.published,
            content: new_post.content,
            content_version: new_post.content_version,
            created_at: now,
            updated_at: now,
        };
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        self.touch();
        Ok(self.posts.read().await.get(&id).cloned())
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        self.touch();
        Ok(self
            .posts
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        self.touch();
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        self.touch();
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        post.content = changes.content;
        post.content_version = changes.content_version;
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        self.touch();
        Ok(self.posts.write().await.remove(&id).is_some())
    }
}
