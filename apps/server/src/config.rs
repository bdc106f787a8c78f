//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use gazette_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Directory uploaded images are written to.
    pub uploads_dir: PathBuf,
    /// Directory of static assets (styles, fallback illustrations).
    pub static_dir: PathBuf,
    /// Glob the Tera templates are loaded from.
    pub templates_glob: String,
    /// Secret the admin session cookie key is derived from (>= 32 bytes).
    pub session_secret: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config.max_connections = max;
            }
            if let Some(min) = env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            templates_glob: env::var("TEMPLATES_GLOB")
                .unwrap_or_else(|_| "templates/**/*.html".to_string()),
            session_secret: env::var("SESSION_SECRET").unwrap_or_else(|_| {
                "gazette-dev-session-secret-change-me-in-production".to_string()
            }),
        }
    }
}
