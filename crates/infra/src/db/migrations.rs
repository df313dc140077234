//! Explicit, versioned schema migrations.
//!
//! Each migration runs once inside a transaction and is recorded in
//! `schema_migrations`; running [`migrate`] again applies nothing.

use sqlx::SqlitePool;
use tracing::instrument;

use crate::store::error::map_sqlx_error;
use crate::store::StoreResult;

#[derive(Debug)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub statements: &'static [&'static str],
}

/// All migrations in version order.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "create users, orders and inventory",
    statements: &[
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            name   TEXT NOT NULL CHECK (length(trim(name)) > 0),
            email  TEXT NOT NULL UNIQUE CHECK (length(trim(email)) > 0),
            role   TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_name      TEXT NOT NULL CHECK (length(trim(customer_name)) > 0),
            monument_type      TEXT NOT NULL,
            material           TEXT NOT NULL,
            engraving_details  TEXT NULL,
            status             TEXT NOT NULL DEFAULT 'Inquiry'
                               CHECK (status IN ('Inquiry', 'Design', 'Production', 'Completed')),
            created_at         TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS inventory (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            material_name  TEXT NOT NULL CHECK (length(trim(material_name)) > 0),
            quantity       REAL NOT NULL,
            reorder_level  REAL NOT NULL DEFAULT 0
        )
        "#,
    ],
}];

/// Apply every migration not yet recorded. Returns how many were applied.
#[instrument(skip(pool))]
pub async fn migrate(pool: &SqlitePool) -> StoreResult<usize> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version      INTEGER PRIMARY KEY,
            description  TEXT NOT NULL,
            applied_at   TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("migrate", e))?;

    let current: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await
        .map_err(|e| map_sqlx_error("migrate", e))?;
    let current = current.unwrap_or(0);

    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;

        for statement in migration.statements {
            sqlx::query(*statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }

        sqlx::query(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
        )
        .bind(migration.version)
        .bind(migration.description)
        .bind(chrono::Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("migrate", e))?;

        tx.commit().await.map_err(|e| map_sqlx_error("migrate", e))?;

        tracing::info!(
            version = migration.version,
            description = migration.description,
            "migration applied"
        );
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::connect;

    #[test]
    fn versions_are_strictly_increasing() {
        let versions: Vec<i64> = MIGRATIONS.iter().map(|m| m.version).collect();
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
        assert!(versions.iter().all(|v| *v > 0));
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();

        assert_eq!(migrate(&pool).await.unwrap(), MIGRATIONS.len());
        assert_eq!(migrate(&pool).await.unwrap(), 0);

        let recorded: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(recorded, MIGRATIONS.len() as i64);
    }

    #[tokio::test]
    async fn creates_all_entity_tables() {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        migrate(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'orders', 'inventory') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["inventory", "orders", "users"]);
    }
}
