//! Infrastructure layer: configuration, SQLite storage, and the domain
//! operations that run against it.

pub mod config;
pub mod db;
pub mod services;
pub mod store;

pub use config::{DatabaseConfig, DatabaseLocation};
pub use services::{DashboardMetrics, ServiceError, ServiceResult};
pub use store::{Constraint, InMemoryStorage, SqliteStorage, Storage, StoreError, StoreResult};
