pub mod auth_services;
pub mod blog_services;
