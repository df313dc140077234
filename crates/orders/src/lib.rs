//! Orders domain module.
//!
//! This crate contains business rules for customer orders (monument jobs),
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;

pub use order::{Material, MonumentType, NewOrder, Order, OrderStatus};
