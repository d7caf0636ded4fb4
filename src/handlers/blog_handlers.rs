// src/handlers/blog_handlers.rs - authoring endpoints under /api/blog

use actix_web::{delete, get, post, put, web, HttpResponse};
use log::info;
use serde_json::json;
use uuid::Uuid;

use crate::dtos::post_dtos::{CreatePostDTO, PostOut, UpdatePostDTO};
use crate::handlers::{ApiError, ApiResponse};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::AppState;

#[get("/blog/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Blog routes active" }))
}

/// POST /api/blog/postblog
#[post("/blog/postblog")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let post = state.blog.create_post(user.user_id, body.into_inner(), true).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Post published successfully",
        PostOut::from_post(post, Some(user.user_id)),
    )))
}

/// POST /api/blog/create-draft
#[post("/blog/create-draft")]
pub async fn create_draft(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let post = state.blog.create_post(user.user_id, body.into_inner(), false).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Draft saved successfully",
        PostOut::from_post(post, Some(user.user_id)),
    )))
}

/// GET /api/blog/user-blogs
#[get("/blog/user-blogs")]
pub async fn user_blogs(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let posts: Vec<PostOut> = state
        .blog
        .list_user_posts(user.user_id)
        .await?
        .into_iter()
        .map(|p| PostOut::from_post(p, Some(user.user_id)))
        .collect();
    info!("listed {} posts for {}", posts.len(), user.user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Posts retrieved successfully", posts)))
}

/// GET /api/blog/{post_id}
/// Anyone may read a published post; drafts only answer their author.
#[get("/blog/{post_id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let viewer = user.map(|u| u.user_id);
    let post = state.blog.get_post(path.into_inner(), viewer).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Post retrieved successfully",
        PostOut::from_post(post, viewer),
    )))
}

/// PUT /api/blog/updateblog/{post_id}
#[put("/blog/updateblog/{post_id}")]
pub async fn update_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let post = state
        .blog
        .update_post(user.user_id, path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Post updated successfully",
        PostOut::from_post(post, Some(user.user_id)),
    )))
}

/// DELETE /api/blog/deleteblog/{post_id}
#[delete("/blog/deleteblog/{post_id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let post_id = path.into_inner();
    state.blog.delete_post(user.user_id, post_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Post deleted successfully",
        json!({ "id": post_id }),
    )))
}

/// POST /api/blog/share-post/{post_id}
#[post("/blog/share-post/{post_id}")]
pub async fn share_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let share = state.blog.share_post(user.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Share link ready", share)))
}
