//! Database adapters: connection pool and schema migrations.

pub mod migrations;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::{DatabaseConfig, DatabaseLocation};
use crate::store::error::map_sqlx_error;
use crate::store::StoreResult;

pub use migrations::{migrate, Migration, MIGRATIONS};

/// Open a connection pool for the configured database.
///
/// File databases are created if absent. Connections are handed out per
/// operation and go back to the pool when the operation's guard drops.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<SqlitePool> {
    let (options, pool_options) = match &config.location {
        DatabaseLocation::File(path) => (
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true),
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1)),
        ),
        DatabaseLocation::InMemory => (
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| map_sqlx_error("connect", e))?,
            // A second connection would open a second, empty database.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
        ),
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| map_sqlx_error("connect", e))?;

    tracing::info!(location = ?config.location, "database pool opened");
    Ok(pool)
}

/// Connect and bring the schema up to date. Run once at process start.
pub async fn init(config: &DatabaseConfig) -> StoreResult<SqlitePool> {
    let pool = connect(config).await?;
    migrate(&pool).await?;
    Ok(pool)
}
