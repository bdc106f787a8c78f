//! # Gazette Server
//!
//! The main entry point for the Actix-web HTTP server: JSON API, uploaded
//! image serving, and the server-rendered site.

use std::sync::Arc;

use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, web};
use tera::Tera;
use tracing_actix_web::TracingLogger;

use gazette_core::ports::{PasswordService, TokenService};
use gazette_infra::auth::{Argon2PasswordService, JwtTokenService};
use gazette_server::config::AppConfig;
use gazette_server::state::AppState;
use gazette_server::telemetry::{TelemetryConfig, init_telemetry};
use gazette_server::{handlers, pages};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Gazette server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(&config).await?;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    let tera = Tera::new(&config.templates_glob).map_err(std::io::Error::other)?;

    let session_key = Key::derive_from(config.session_secret.as_bytes());

    // The uploads directory must exist before actix-files mounts it.
    tokio::fs::create_dir_all(&config.uploads_dir).await?;

    let uploads_dir = config.uploads_dir.clone();
    let static_dir = config.static_dir.clone();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .app_data(web::Data::new(tera.clone()))
            .configure(handlers::configure_routes)
            .configure(pages::configure_pages)
            .service(Files::new("/uploads", uploads_dir.clone()))
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
