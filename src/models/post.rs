use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A stored post. `content` is kept as raw JSON so rows written by older
/// clients still load; the renderer decides what it can show.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub published: bool,
    pub content: Vec<Value>,
    pub content_version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    pub fn is_draft(&self) -> bool {
        !self.published
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub published: bool,
    pub content: Vec<Value>,
    pub content_version: i32,
}

/// Replacement applied by an update: the widget array is always swapped whole.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Vec<Value>,
    pub published: Option<bool>,
    pub content_version: i32,
}
