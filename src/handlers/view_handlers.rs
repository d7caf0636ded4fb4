// src/handlers/view_handlers.rs - public, read-only post views

use actix_web::{get, web, HttpResponse};

use crate::dtos::post_dtos::PostOut;
use crate::handlers::{ApiError, ApiResponse};
use crate::AppState;

/// GET /api/viewblog/{slug}
#[get("/viewblog/{slug}")]
pub async fn view_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let post = state.blog.view_by_slug(&path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Post retrieved successfully",
        PostOut::from_post(post, None),
    )))
}

/// GET /api/viewblog/{slug}/render
/// Server-side rendering of the post grid as an HTML fragment.
#[get("/viewblog/{slug}/render")]
pub async fn render_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let rendered = state.blog.render_by_slug(&path).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(rendered.to_html()))
}
