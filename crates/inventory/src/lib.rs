//! Inventory domain module.
//!
//! This crate contains business rules for stocked materials and their reorder
//! thresholds, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod item;

pub use item::{InventoryItem, NewInventoryItem};
