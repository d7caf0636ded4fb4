// src/services/blog_services.rs - post lifecycle: compose, read, replace, delete, share
use log::{info, warn};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;
use uuid::Uuid;

use crate::content::renderer::{self, RenderedPost};
use crate::content::{CONTENT_VERSION, ContentError, Widget, validate_widgets};
use crate::dtos::post_dtos::{CreatePostDTO, ShareOut, UpdatePostDTO};
use crate::models::post::{NewPost, Post, PostChanges};
use crate::repositories::post_repository::{PostRepository, RepoError};

const MAX_TITLE_LEN: usize = 200;
const MAX_SLUG_BASE_LEN: usize = 60;
const SLUG_ATTEMPTS: usize = 3;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("post not found")]
    NotFound,
    #[error("you are not the author of this post")]
    Forbidden,
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("invalid content: {0}")]
    Content(#[from] ContentError),
    #[error("storage error: {0}")]
    Repo(#[from] RepoError),
}

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug regex"))
}

/// URL-safe slug from a title plus a random suffix, e.g. `my-first-post-1a2b3c4d`.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let base = non_slug_chars().replace_all(&lowered, "-");
    let mut base: String = base.trim_matches('-').chars().take(MAX_SLUG_BASE_LEN).collect();
    base = base.trim_end_matches('-').to_string();
    if base.is_empty() {
        base = "post".to_string();
    }
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", base, &suffix[..8])
}

fn validate_title(title: &str) -> Result<String, BlogError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BlogError::Validation("Title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(BlogError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(title.to_string())
}

fn widgets_to_json(widgets: &[Widget]) -> Result<Vec<Value>, BlogError> {
    validate_widgets(widgets)?;
    widgets
        .iter()
        .map(|w| serde_json::to_value(w).map_err(|e| BlogError::Validation(e.to_string())))
        .collect()
}

#[derive(Clone)]
pub struct BlogService {
    repo: PostRepository,
    public_base_url: String,
}

impl BlogService {
    pub fn new(repo: PostRepository, public_base_url: impl Into<String>) -> Self {
        Self {
            repo,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Store a new post; `published = false` makes it a draft.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        dto: CreatePostDTO,
        published: bool,
    ) -> Result<Post, BlogError> {
        let title = validate_title(&dto.title)?;
        let content = widgets_to_json(&dto.content)?;

        for attempt in 1..=SLUG_ATTEMPTS {
            let new_post = NewPost {
                author_id,
                title: title.clone(),
                slug: generate_slug(&title),
                published,
                content: content.clone(),
                content_version: CONTENT_VERSION,
            };
            match self.repo.insert(new_post).await {
                Ok(post) => {
                    info!(
                        "created {} {} ({} widgets) for {}",
                        if published { "post" } else { "draft" },
                        post.slug,
                        post.content.len(),
                        author_id
                    );
                    return Ok(post);
                }
                Err(RepoError::SlugTaken(slug)) => {
                    warn!("slug {} taken (attempt {}), regenerating", slug, attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(BlogError::Conflict(
            "Could not allocate a unique slug, please retry".to_string(),
        ))
    }

    /// Post by id; drafts are visible to their author only.
    pub async fn get_post(&self, id: Uuid, viewer: Option<Uuid>) -> Result<Post, BlogError> {
        let post = self.repo.find_by_id(id).await?.ok_or(BlogError::NotFound)?;
        if post.is_draft() && viewer != Some(post.author_id) {
            return Err(BlogError::NotFound);
        }
        Ok(post)
    }

    /// Published post by slug for public viewing.
    pub async fn view_by_slug(&self, slug: &str) -> Result<Post, BlogError> {
        match self.repo.find_by_slug(slug).await? {
            Some(post) if post.published => Ok(post),
            _ => Err(BlogError::NotFound),
        }
    }

    pub async fn render_by_slug(&self, slug: &str) -> Result<RenderedPost, BlogError> {
        let post = self.view_by_slug(slug).await?;
        Ok(renderer::render_post(post.content_version, &post.content)?)
    }

    pub async fn list_user_posts(&self, author_id: Uuid) -> Result<Vec<Post>, BlogError> {
        Ok(self.repo.list_by_author(author_id).await?)
    }

    async fn owned_post(&self, author_id: Uuid, id: Uuid) -> Result<Post, BlogError> {
        let post = self.repo.find_by_id(id).await?.ok_or(BlogError::NotFound)?;
        if !post.is_authored_by(author_id) {
            return Err(BlogError::Forbidden);
        }
        Ok(post)
    }

    /// Replace a post's widget array (and optionally title / published flag).
    pub async fn update_post(
        &self,
        author_id: Uuid,
        id: Uuid,
        dto: UpdatePostDTO,
    ) -> Result<Post, BlogError> {
        let title = dto.title.as_deref().map(validate_title).transpose()?;
        let content = widgets_to_json(&dto.content)?;
        self.owned_post(author_id, id).await?;

        let changes = PostChanges {
            title,
            content,
            published: dto.published,
            content_version: CONTENT_VERSION,
        };
        let post = self.repo.update(id, changes).await?.ok_or(BlogError::NotFound)?;
        info!("updated post {} ({} widgets)", post.slug, post.content.len());
        Ok(post)
    }

    pub async fn delete_post(&self, author_id: Uuid, id: Uuid) -> Result<(), BlogError> {
        let post = self.owned_post(author_id, id).await?;
        if !self.repo.delete(id).await? {
            return Err(BlogError::NotFound);
        }
        info!("deleted post {}", post.slug);
        Ok(())
    }

    /// Public link for a published post.
    pub async fn share_post(&self, author_id: Uuid, id: Uuid) -> Result<ShareOut, BlogError> {
        let post = self.owned_post(author_id, id).await?;
        if post.is_draft() {
            return Err(BlogError::Conflict(
                "Publish the draft before sharing it".to_string(),
            ));
        }
        let url = format!(
            "{}/viewblog/{}",
            self.public_base_url,
            urlencoding::encode(&post.slug)
        );
        Ok(ShareOut {
            post_id: post.id,
            slug: post.slug,
            url,
        })
    }
}
