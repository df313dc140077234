//! System users: identity + role tag.
//!
//! Roles are recorded but not enforced anywhere; there is no authorization
//! layer in this system.

pub mod roles;
pub mod user;

pub use roles::Role;
pub use user::{NewUser, User};
