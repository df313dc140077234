//! Configuration loading and representation.

use std::path::PathBuf;

/// Environment variable holding the path of the SQLite database file.
pub const DB_PATH_ENV: &str = "MASON_DB_PATH";

/// Database file used when `MASON_DB_PATH` is not set.
pub const DEFAULT_DB_PATH: &str = "monumental_mason.db";

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// A single SQLite file, created on first connect.
    File(PathBuf),
    /// A private in-memory database (tests/dev). Lost when the pool closes.
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub location: DatabaseLocation,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DatabaseLocation::File(path.into()),
            max_connections: 4,
        }
    }

    /// In-memory store backed by a single connection, so every operation
    /// sees the same database.
    pub fn in_memory() -> Self {
        Self {
            location: DatabaseLocation::InMemory,
            max_connections: 1,
        }
    }

    /// Load from `MASON_DB_PATH`, falling back to `monumental_mason.db`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(DB_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            Some(path) => Self::file(path),
            None => {
                tracing::warn!("{DB_PATH_ENV} not set; using {DEFAULT_DB_PATH}");
                Self::file(DEFAULT_DB_PATH)
            }
        }
    }
}
