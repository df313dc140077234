//! Storage wiring for the HTTP layer.

use std::sync::Arc;

use anyhow::Context;

use mason_infra::{db, DatabaseConfig, InMemoryStorage, SqliteStorage, Storage};

/// Shared handles passed to every handler.
pub struct AppServices {
    pub storage: Arc<dyn Storage>,
}

impl AppServices {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Services backed by [`InMemoryStorage`] (tests/dev).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStorage::new()))
    }
}

/// Open the SQLite pool and run migrations once.
pub async fn build_services(config: &DatabaseConfig) -> anyhow::Result<AppServices> {
    let pool = db::init(config)
        .await
        .with_context(|| format!("failed to initialize database at {:?}", config.location))?;

    Ok(AppServices::new(Arc::new(SqliteStorage::new(pool))))
}
