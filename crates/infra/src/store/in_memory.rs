use std::sync::RwLock;

use async_trait::async_trait;

use mason_core::{InventoryItemId, OrderId, UserId};
use mason_inventory::{InventoryItem, NewInventoryItem};
use mason_orders::{NewOrder, Order, OrderStatus};
use mason_users::{NewUser, User};

use super::error::{Constraint, StoreError, StoreResult};
use super::Storage;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    orders: Vec<Order>,
    inventory: Vec<InventoryItem>,
    next_user_id: i64,
    next_order_id: i64,
    next_inventory_id: i64,
}

/// In-memory storage for tests/dev.
///
/// Enforces the same rules as the SQLite schema: non-empty names, unique user
/// email. Rows are kept in insertion order, which is also identifier order.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    inner: RwLock<Tables>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory storage lock poisoned".into())
}

fn check_non_empty(table: &str, column: &str, value: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::constraint(
            Constraint::Check,
            format!("CHECK constraint failed: {table}.{column}"),
        ));
    }
    Ok(())
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.inner.write().map_err(poisoned)?;

        check_non_empty("users", "name", &user.name)?;
        check_non_empty("users", "email", &user.email)?;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::constraint(
                Constraint::Unique,
                "UNIQUE constraint failed: users.email",
            ));
        }

        let id = UserId::new(next_id(&mut tables.next_user_id));
        let user = User::from_new(id, user);
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables.users.clone())
    }

    async fn create_order(&self, order: NewOrder) -> StoreResult<Order> {
        let mut tables = self.inner.write().map_err(poisoned)?;

        check_non_empty("orders", "customer_name", &order.customer_name)?;

        let id = OrderId::new(next_id(&mut tables.next_order_id));
        let order = Order::from_new(id, order);
        tables.orders.push(order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables.orders.clone())
    }

    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        let mut tables = self.inner.write().map_err(poisoned)?;

        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(StoreError::NotFound)?;
        order.status = status;
        Ok(order.clone())
    }

    async fn count_orders(&self) -> StoreResult<u64> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables.orders.len() as u64)
    }

    async fn count_orders_excluding(&self, status: OrderStatus) -> StoreResult<u64> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables.orders.iter().filter(|o| o.status != status).count() as u64)
    }

    async fn create_inventory_item(&self, item: NewInventoryItem) -> StoreResult<InventoryItem> {
        let mut tables = self.inner.write().map_err(poisoned)?;

        check_non_empty("inventory", "material_name", &item.material_name)?;

        let id = InventoryItemId::new(next_id(&mut tables.next_inventory_id));
        let item = InventoryItem::from_new(id, item);
        tables.inventory.push(item.clone());
        Ok(item)
    }

    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables.inventory.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mason_orders::{Material, MonumentType};
    use mason_users::Role;

    fn user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: email.into(),
            role: Role::DESIGNER,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_insertion_order() {
        let store = InMemoryStorage::new();

        let a = store.create_user(user("a@example.com")).await.unwrap();
        let b = store.create_user(user("b@example.com")).await.unwrap();

        assert_eq!(a.id, UserId::new(1));
        assert_eq!(b.id, UserId::new(2));
        assert_eq!(store.list_users().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_writing() {
        let store = InMemoryStorage::new();
        store.create_user(user("a@example.com")).await.unwrap();

        let err = store.create_user(user("a@example.com")).await.unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_customer_name_is_a_check_violation() {
        let store = InMemoryStorage::new();
        let order = NewOrder {
            customer_name: " ".into(),
            monument_type: MonumentType::Plaque,
            material: Material::Marble,
            engraving_details: None,
            status: OrderStatus::Inquiry,
            created_at: Utc::now(),
        };

        let err = store.create_order(order).await.unwrap_err();

        assert!(matches!(
            err,
            StoreError::ConstraintViolation {
                constraint: Constraint::Check,
                ..
            }
        ));
        assert_eq!(store.count_orders().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn blank_material_name_is_a_check_violation() {
        let store = InMemoryStorage::new();
        let item = NewInventoryItem {
            material_name: "  ".into(),
            quantity: 1.0,
            reorder_level: 0.0,
        };

        let err = store.create_inventory_item(item).await.unwrap_err();

        assert!(matches!(
            err,
            StoreError::ConstraintViolation {
                constraint: Constraint::Check,
                ..
            }
        ));
        assert!(store.list_inventory_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_order_status_update_is_not_found() {
        let store = InMemoryStorage::new();
        assert_eq!(
            store
                .set_order_status(OrderId::new(3), OrderStatus::Design)
                .await
                .unwrap_err(),
            StoreError::NotFound
        );
    }
}
