//! Storage of users, orders and inventory.
//!
//! `Storage` is the seam between the domain operations and persistence.
//! `SqliteStorage` is the production implementation; `InMemoryStorage` mirrors
//! its constraints for tests/dev.

pub mod error;
pub mod in_memory;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use mason_core::OrderId;
use mason_inventory::{InventoryItem, NewInventoryItem};
use mason_orders::{NewOrder, Order, OrderStatus};
use mason_users::{NewUser, User};

pub use error::{Constraint, StoreError, StoreResult};
pub use in_memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

/// Durable record of the three entity tables.
///
/// Every `create_*` is immediately durable and returns the record with its
/// assigned identifier. Every `list_*` re-reads current state and yields
/// records by identifier ascending.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order>;
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;
    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>>;
    /// Overwrite an order's status without any lifecycle check.
    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order>;
    async fn count_orders(&self) -> StoreResult<u64>;
    /// Count orders whose status differs from `status`.
    async fn count_orders_excluding(&self, status: OrderStatus) -> StoreResult<u64>;

    async fn create_inventory_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem>;
    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>>;
}

#[async_trait]
impl<S> Storage for Arc<S>
where
    S: Storage + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        (**self).create_user(user).await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        (**self).list_users().await
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        (**self).create_order(order).await
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        (**self).list_orders().await
    }

    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        (**self).get_order(id).await
    }

    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        (**self).set_order_status(id, status).await
    }

    async fn count_orders(&self) -> StoreResult<u64> {
        (**self).count_orders().await
    }

    async fn count_orders_excluding(&self, status: OrderStatus) -> StoreResult<u64> {
        (**self).count_orders_excluding(status).await
    }

    async fn create_inventory_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem> {
        (**self).create_inventory_item(item).await
    }

    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>> {
        (**self).list_inventory_items().await
    }
}
