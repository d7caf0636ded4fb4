use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::content::Widget;
use crate::models::post::Post;

#[derive(Debug, Deserialize)]
pub struct CreatePostDTO {
    pub title: String,
    #[serde(default)]
    pub content: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostDTO {
    pub title: Option<String>,
    pub content: Vec<Widget>,
    /// `true` publishes a draft, `false` takes a post back to draft.
    pub published: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PostOut {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub published: bool,
    pub content: Vec<Value>,
    pub content_version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_own_post: bool,
}

impl PostOut {
    pub fn from_post(post: Post, viewer: Option<Uuid>) -> Self {
        let is_own_post = viewer.is_some_and(|v| post.is_authored_by(v));
        Self {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            slug: post.slug,
            published: post.published,
            content: post.content,
            content_version: post.content_version,
            created_at: post.created_at,
            updated_at: post.updated_at,
            is_own_post,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShareOut {
    pub post_id: Uuid,
    pub slug: String,
    pub url: String,
}
