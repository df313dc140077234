//! SQLite-backed storage.
//!
//! Every operation acquires its own pooled connection; the connection is
//! released when the guard drops, on success and on error alike.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::{FromRow, Sqlite, SqlitePool};
use tracing::instrument;

use mason_core::{InventoryItemId, OrderId, UserId};
use mason_inventory::{InventoryItem, NewInventoryItem};
use mason_orders::{NewOrder, Order, OrderStatus};
use mason_users::{NewUser, Role, User};

use super::error::{map_sqlx_error, StoreError, StoreResult};
use super::Storage;

#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Wrap a pool whose schema is already migrated (see [`crate::db::init`]).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn conn(&self, operation: &str) -> StoreResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(operation, e))
    }
}

// SQLx row types

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
            role: Role::new(row.role),
        }
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    monument_type: String,
    material: String,
    engraving_details: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let decode = |e: mason_core::DomainError| StoreError::Decode(format!("order {}: {e}", row.id));
        Ok(Order {
            id: OrderId::new(row.id),
            monument_type: row.monument_type.parse().map_err(decode)?,
            material: row.material.parse().map_err(decode)?,
            status: row.status.parse().map_err(decode)?,
            customer_name: row.customer_name,
            engraving_details: row.engraving_details,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct InventoryRow {
    id: i64,
    material_name: String,
    quantity: f64,
    reorder_level: f64,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        InventoryItem {
            id: InventoryItemId::new(row.id),
            material_name: row.material_name,
            quantity: row.quantity,
            reorder_level: row.reorder_level,
        }
    }
}

const SELECT_ORDER: &str = r#"
    SELECT id, customer_name, monument_type, material, engraving_details, status, created_at
    FROM orders
"#;

#[async_trait]
impl Storage for SqliteStorage {
    #[instrument(skip(self, user), fields(entity = "user"))]
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut conn = self.conn("create_user").await?;

        let result = sqlx::query("INSERT INTO users (name, email, role) VALUES (?1, ?2, ?3)")
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.role.as_str())
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("create_user", e))?;

        Ok(User::from_new(UserId::new(result.last_insert_rowid()), user))
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let mut conn = self.conn("list_users").await?;

        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, name, email, role FROM users ORDER BY id ASC")
                .fetch_all(&mut *conn)
                .await
                .map_err(|e| map_sqlx_error("list_users", e))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, order), fields(entity = "order"))]
    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let mut conn = self.conn("create_order").await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                customer_name,
                monument_type,
                material,
                engraving_details,
                status,
                created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order.customer_name)
        .bind(order.monument_type.as_str())
        .bind(order.material.as_str())
        .bind(order.engraving_details.as_deref())
        .bind(order.status.as_str())
        .bind(order.created_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("create_order", e))?;

        Ok(Order::from_new(OrderId::new(result.last_insert_rowid()), order))
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let mut conn = self.conn("list_orders").await?;

        let rows: Vec<OrderRow> = sqlx::query_as(&format!("{SELECT_ORDER} ORDER BY id ASC"))
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("list_orders", e))?;

        rows.into_iter().map(Order::try_from).collect()
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let mut conn = self.conn("get_order").await?;

        let row: Option<OrderRow> = sqlx::query_as(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id.get())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("get_order", e))?;

        row.map(Order::try_from).transpose()
    }

    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let mut conn = self.conn("set_order_status").await?;

        let result = sqlx::query("UPDATE orders SET status = ?1 WHERE id = ?2")
            .bind(status.as_str())
            .bind(id.get())
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("set_order_status", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        let row: OrderRow = sqlx::query_as(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id.get())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("set_order_status", e))?;

        Order::try_from(row)
    }

    #[instrument(skip(self))]
    async fn count_orders(&self) -> StoreResult<u64> {
        let mut conn = self.conn("count_orders").await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("count_orders", e))?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self), fields(status = %status))]
    async fn count_orders_excluding(&self, status: OrderStatus) -> StoreResult<u64> {
        let mut conn = self.conn("count_orders_excluding").await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status <> ?1")
            .bind(status.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("count_orders_excluding", e))?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self, item), fields(entity = "inventory"))]
    async fn create_inventory_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem> {
        let mut conn = self.conn("create_inventory_item").await?;

        let result = sqlx::query(
            "INSERT INTO inventory (material_name, quantity, reorder_level) VALUES (?1, ?2, ?3)",
        )
        .bind(&item.material_name)
        .bind(item.quantity)
        .bind(item.reorder_level)
        .execute(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("create_inventory_item", e))?;

        Ok(InventoryItem::from_new(
            InventoryItemId::new(result.last_insert_rowid()),
            item,
        ))
    }

    #[instrument(skip(self))]
    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let mut conn = self.conn("list_inventory_items").await?;

        let rows: Vec<InventoryRow> = sqlx::query_as(
            "SELECT id, material_name, quantity, reorder_level FROM inventory ORDER BY id ASC",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("list_inventory_items", e))?;

        Ok(rows.into_iter().map(InventoryItem::from).collect())
    }
}
