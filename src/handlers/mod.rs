pub mod blog_handlers;
pub mod view_handlers;

use actix_web::http::StatusCode;
use actix_web::error::InternalError;
use actix_web::{web, HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;

use crate::services::blog_services::BlogError;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::error(self.to_string()))
    }
}

impl From<BlogError> for ApiError {
    fn from(e: BlogError) -> Self {
        match e {
            BlogError::NotFound => ApiError::NotFound("Post not found".to_string()),
            BlogError::Forbidden => ApiError::Forbidden("You are not the author of this post".to_string()),
            BlogError::Conflict(msg) => ApiError::Conflict(msg),
            BlogError::Validation(msg) => ApiError::BadRequest(msg),
            BlogError::Content(inner) => ApiError::BadRequest(inner.to_string()),
            BlogError::Repo(inner) => {
                error!("storage failure: {}", inner);
                ApiError::Internal("Database error".to_string())
            }
        }
    }
}

/// JSON body errors answered in the same envelope as everything else.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1 << 20)
        .error_handler(|err, _req| {
            let message = format!("Invalid request body: {}", err);
            InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(ApiResponse::error(message)),
            )
            .into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // fixed paths before /blog/{post_id}
            .service(blog_handlers::ping)
            .service(blog_handlers::user_blogs)
            .service(blog_handlers::create_post)
            .service(blog_handlers::create_draft)
            .service(blog_handlers::update_post)
            .service(blog_handlers::delete_post)
            .service(blog_handlers::share_post)
            .service(blog_handlers::get_post)
            .service(view_handlers::render_by_slug)
            .service(view_handlers::view_by_slug),
    );
}
