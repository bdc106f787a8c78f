//! Database connection management.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr, SqlxPostgresConnector};

/// Configuration for the record store connection.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
        }
    }
}

/// Open the database connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!(pool = config.max_connections, "Database connected");

    Ok(conn)
}

/// Obtain another handle to the same underlying connection pool.
///
/// `DatabaseConnection` only derives `Clone` when sea-orm's `mock` feature is
/// disabled, so cloning the connection directly does not compile in a workspace
/// build that also pulls in the mock-based tests. The pool handle is always
/// clonable and is what a direct `clone()` would share, so this reproduces that
/// behaviour: every returned connection drives the one pool opened by `connect`.
pub fn share_connection(conn: &DbConn) -> DbConn {
    SqlxPostgresConnector::from_sqlx_postgres_pool(conn.get_postgres_connection_pool().clone())
}
