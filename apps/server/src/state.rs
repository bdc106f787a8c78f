//! Application state - shared across all handlers.

use std::sync::Arc;

use gazette_core::ports::{ContactRepository, MediaStore, PostRepository, UserRepository};
use gazette_infra::database::{
    MemoryStore, PostgresContactRepository, PostgresPostRepository, PostgresUserRepository,
    connect, share_connection,
};
use gazette_infra::media::LocalMediaStore;

use crate::config::AppConfig;

/// Public URL prefix uploaded images are served under.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub users: Arc<dyn UserRepository>,
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without `DATABASE_URL` the server runs on the in-memory store; records
    /// then live only as long as the process.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
            config.uploads_dir.clone(),
            UPLOADS_PREFIX,
        ));

        let (posts, contacts, users): (
            Arc<dyn PostRepository>,
            Arc<dyn ContactRepository>,
            Arc<dyn UserRepository>,
        ) = match &config.database {
            Some(db_config) => {
                let conn = connect(db_config).await.map_err(std::io::Error::other)?;
                (
                    Arc::new(PostgresPostRepository::new(share_connection(&conn))),
                    Arc::new(PostgresContactRepository::new(share_connection(&conn))),
                    Arc::new(PostgresUserRepository::new(conn)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running on the in-memory store.");
                let store = MemoryStore::new();
                (
                    Arc::new(store.clone()),
                    Arc::new(store.clone()),
                    Arc::new(store),
                )
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            posts,
            contacts,
            users,
            media,
        })
    }

    /// State over an explicit in-memory store and media store. Used by tests.
    pub fn with_store(store: MemoryStore, media: Arc<dyn MediaStore>) -> Self {
        Self {
            posts: Arc::new(store.clone()),
            contacts: Arc::new(store.clone()),
            users: Arc::new(store),
            media,
        }
    }
}
