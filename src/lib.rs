pub mod config;
pub mod content;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use crate::services::blog_services::BlogService;

#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
}
