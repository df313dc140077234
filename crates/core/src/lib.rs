//! `mason-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no HTTP).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{required_text, DomainError, DomainResult};
pub use id::{InventoryItemId, OrderId, UserId};
