//! Domain operations.
//!
//! Each operation receives the storage handle explicitly and performs one
//! interaction: validate, then a single storage call (or a read/modify/write
//! pair for the order lifecycle). Nothing here keeps state between calls.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use mason_core::{DomainError, Entity, OrderId};
use mason_inventory::{InventoryItem, NewInventoryItem};
use mason_orders::{Material, MonumentType, NewOrder, Order, OrderStatus};
use mason_users::{NewUser, User};

use crate::store::{Storage, StoreError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Input was rejected before reaching storage.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A record with the same unique key is already stored.
    #[error("{0}")]
    AlreadyExists(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_orders: u64,
    /// Orders not yet `Completed`.
    pub pending_orders: u64,
}

fn log_recorded<E: Entity>(record: &E) {
    tracing::info!(entity = E::KIND, id = %record.id(), "record created");
}

/// Record a new customer order in the `Inquiry` stage, stamped with the
/// current UTC time.
#[instrument(skip(store, engraving_details))]
pub async fn record_order<S>(
    store: &S,
    customer_name: &str,
    monument_type: MonumentType,
    material: Material,
    engraving_details: Option<String>,
) -> ServiceResult<Order>
where
    S: Storage + ?Sized,
{
    let order = NewOrder::new(
        customer_name,
        monument_type,
        material,
        engraving_details,
        Utc::now(),
    )
    .inspect_err(|e| tracing::warn!(error = %e, "order rejected"))?;

    let order = store.create_order(order).await?;
    log_recorded(&order);
    Ok(order)
}

#[instrument(skip(store))]
pub async fn record_inventory_item<S>(
    store: &S,
    material_name: &str,
    quantity: f64,
    reorder_level: f64,
) -> ServiceResult<InventoryItem>
where
    S: Storage + ?Sized,
{
    let item = NewInventoryItem::new(material_name, quantity, reorder_level)
        .inspect_err(|e| tracing::warn!(error = %e, "inventory item rejected"))?;

    let item = store.create_inventory_item(item).await?;
    log_recorded(&item);
    Ok(item)
}

/// Record a new system user. A second user with the same email is reported
/// as [`ServiceError::AlreadyExists`] and nothing is written.
#[instrument(skip(store, email))]
pub async fn record_user<S>(store: &S, name: &str, email: &str, role: &str) -> ServiceResult<User>
where
    S: Storage + ?Sized,
{
    let user = NewUser::new(name, email, role)
        .inspect_err(|e| tracing::warn!(error = %e, "user rejected"))?;
    let email = user.email.clone();

    match store.create_user(user).await {
        Ok(user) => {
            log_recorded(&user);
            Ok(user)
        }
        Err(e) if e.is_unique_violation() => {
            tracing::warn!("user rejected: duplicate email");
            Err(ServiceError::AlreadyExists(format!(
                "a user with email {email} already exists"
            )))
        }
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(store))]
pub async fn compute_dashboard_metrics<S>(store: &S) -> ServiceResult<DashboardMetrics>
where
    S: Storage + ?Sized,
{
    let total_orders = store.count_orders().await?;
    let pending_orders = store.count_orders_excluding(OrderStatus::Completed).await?;

    Ok(DashboardMetrics {
        total_orders,
        pending_orders,
    })
}

pub async fn list_orders<S>(store: &S) -> ServiceResult<Vec<Order>>
where
    S: Storage + ?Sized,
{
    Ok(store.list_orders().await?)
}

pub async fn list_inventory_items<S>(store: &S) -> ServiceResult<Vec<InventoryItem>>
where
    S: Storage + ?Sized,
{
    Ok(store.list_inventory_items().await?)
}

pub async fn list_users<S>(store: &S) -> ServiceResult<Vec<User>>
where
    S: Storage + ?Sized,
{
    Ok(store.list_users().await?)
}

/// Materials whose quantity has fallen strictly below their reorder level.
#[instrument(skip(store))]
pub async fn items_needing_reorder<S>(store: &S) -> ServiceResult<Vec<InventoryItem>>
where
    S: Storage + ?Sized,
{
    let items = store.list_inventory_items().await?;
    Ok(items.into_iter().filter(|i| i.needs_reorder()).collect())
}

/// Move an order one stage forward along its lifecycle.
#[instrument(skip(store))]
pub async fn advance_order<S>(store: &S, id: OrderId) -> ServiceResult<Order>
where
    S: Storage + ?Sized,
{
    let mut order = store
        .get_order(id)
        .await?
        .ok_or_else(DomainError::not_found)?;

    let next = order
        .advance()
        .inspect_err(|e| tracing::warn!(error = %e, "order not advanced"))?;

    let order = store.set_order_status(id, next).await?;
    tracing::info!(order_id = %order.id, status = %order.status, "order advanced");
    Ok(order)
}
