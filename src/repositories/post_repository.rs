// src/repositories/post_repository.rs - storage front for posts, backed by Postgres or memory

use thiserror::Error;
use uuid::Uuid;

use crate::models::post::{NewPost, Post, PostChanges};
use crate::repositories::post_memory_repo::MemoryPostRepo;
use crate::repositories::post_pg_repo::PgPostRepo;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
    #[error("postgres error: {0}")]
    Postgres(tokio_postgres::Error),
    #[error("slug '{0}' is already taken")]
    SlugTaken(String),
}

impl From<tokio_postgres::Error> for RepoError {
    fn from(e: tokio_postgres::Error) -> Self {
        RepoError::Postgres(e)
    }
}

#[derive(Clone)]
pub enum PostRepository {
    Postgres(PgPostRepo),
    Memory(MemoryPostRepo),
}

impl PostRepository {
    pub async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        match self {
            PostRepository::Postgres(repo) => repo.insert(new_post).await,
            PostRepository::Memory(repo) => repo.insert(new_post).await,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        match self {
            PostRepository::Postgres(repo) => repo.find_by_id(id).await,
            PostRepository::Memory(repo) => repo.find_by_id(id).await,
        }
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        match self {
            PostRepository::Postgres(repo) => repo.find_by_slug(slug).await,
            PostRepository::Memory(repo) => repo.find_by_slug(slug).await,
        }
    }

    /// Posts written by `author_id`, newest first.
    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        match self {
            PostRepository::Postgres(repo) => repo.list_by_author(author_id).await,
            PostRepository::Memory(repo) => repo.list_by_author(author_id).await,
        }
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        match self {
            PostRepository::Postgres(repo) => repo.update(id, changes).await,
            PostRepository::Memory(repo) => repo.update(id, changes).await,
        }
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        match self {
            PostRepository::Postgres(repo) => repo.delete(id).await,
            PostRepository::Memory(repo) => repo.delete(id).await,
        }
    }
}
