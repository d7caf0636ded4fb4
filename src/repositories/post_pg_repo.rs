// src/repositories/post_pg_repo.rs - posts table in Postgres, content kept as JSONB

use deadpool_postgres::Pool;
use log::info;
use serde_json::Value;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::models::post::{NewPost, Post, PostChanges};
use crate::repositories::post_repository::RepoError;

const SCHEMA: &str = include_str!("../../migrations/001_posts.sql");

const COLUMNS: &str =
    "id, author_id, title, slug, published, content, content_version, created_at, updated_at";

#[derive(Clone)]
pub struct PgPostRepo {
    pool: Pool,
}

impl PgPostRepo {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create the posts table and its indexes if they are missing.
    pub async fn migrate(&self) -> Result<(), RepoError> {
        let client = self.pool.get().await?;
        client.batch_execute(SCHEMA).await?;
        info!("posts schema ready");
        Ok(())
    }

    pub async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "INSERT INTO posts (id, author_id, title, slug, published, content, content_version) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            COLUMNS
        );
        let content = Value::Array(new_post.content);
        let result = client
            .query_one(
                sql.as_str(),
                &[
                    &Uuid::new_v4(),
                    &new_post.author_id,
                    &new_post.title,
                    &new_post.slug,
                    &new_post.published,
                    &content,
                    &new_post.content_version,
                ],
            )
            .await;

        match result {
            Ok(row) => row_to_post(&row),
            Err(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => {
                Err(RepoError::SlugTaken(new_post.slug))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM posts WHERE id = $1", COLUMNS);
        let row = client.query_opt(sql.as_str(), &[&id]).await?;
        row.as_ref().map(row_to_post).transpose()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!("SELECT {} FROM posts WHERE slug = $1", COLUMNS);
        let row = client.query_opt(sql.as_str(), &[&slug]).await?;
        row.as_ref().map(row_to_post).transpose()
    }

    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        let rows = client.query(sql.as_str(), &[&author_id]).await?;
        rows.iter().map(row_to_post).collect()
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let client = self.pool.get().await?;
        let sql = format!(
            "UPDATE posts SET title = COALESCE($2, title), content = $3, \
             published = COALESCE($4, published), content_version = $5, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let content = Value::Array(changes.content);
        let row = client
            .query_opt(
                sql.as_str(),
                &[
                    &id,
                    &changes.title,
                    &content,
                    &changes.published,
                    &changes.content_version,
                ],
            )
            .await?;
        row.as_ref().map(row_to_post).transpose()
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM posts WHERE id = $1", &[&id])
            .await?;
        Ok(deleted > 0)
    }
}

fn row_to_post(row: &Row) -> Result<Post, RepoError> {
    let content: Value = row.try_get("content")?;
    let content = match content {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };
    Ok(Post {
        id: row.try_get("id")?,
        author_id: row.try_get("author_id")?,
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        published: row.try_get("published")?,
        content,
        content_version: row.try_get("content_version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
