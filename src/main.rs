use actix_cors::Cors;
use actix_web::{App, HttpServer, web, middleware::Logger};
use log::{info, error};

use blogify::AppState;
use blogify::config::{self, AppConfig, StorageBackend};
use blogify::handlers;
use blogify::repositories::post_memory_repo::MemoryPostRepo;
use blogify::repositories::post_pg_repo::PgPostRepo;
use blogify::repositories::post_repository::PostRepository;
use blogify::services::auth_services::AuthService;
use blogify::services::blog_services::BlogService;

fn mask_key(k: &str) -> String {
    let chars: Vec<char> = k.chars().collect();
    if chars.len() <= 8 {
        return "[REDACTED]".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

async fn build_repository(storage: StorageBackend) -> anyhow::Result<PostRepository> {
    match storage {
        StorageBackend::Memory => {
            info!("Using in-memory post storage");
            Ok(PostRepository::Memory(MemoryPostRepo::new()))
        }
        StorageBackend::Postgres => {
            let repo = PgPostRepo::new(config::get_pg_pool()?);
            repo.migrate().await?;
            Ok(PostRepository::Postgres(repo))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("JWT secret: {}", mask_key(&cfg.jwt_secret));
    info!("Public base URL: {}", cfg.public_base_url);

    let repo = match build_repository(cfg.storage).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to set up post storage: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState {
        blog: BlogService::new(repo, cfg.public_base_url.clone()),
    });
    let auth_data = web::Data::new(AuthService::new(&cfg.jwt_secret));

    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    let allowed_origins = cfg.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "content-type",
                "accept",
                "x-requested-with"
            ])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(auth_data.clone())
            .app_data(handlers::json_config())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
