use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use mason_core::{DomainError, DomainResult};

/// Role label attached to a user.
///
/// Roles are opaque strings at the storage layer, so a row written by another
/// tool may carry any label. New users are limited to [`Role::RECOGNIZED`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("Admin"));
    pub const SALES: Role = Role(Cow::Borrowed("Sales"));
    pub const DESIGNER: Role = Role(Cow::Borrowed("Designer"));

    /// Labels offered when creating a user.
    pub const RECOGNIZED: &'static [Role] = &[Role::ADMIN, Role::SALES, Role::DESIGNER];

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Parse one of the recognized labels (case-sensitive).
    pub fn recognized(name: &str) -> DomainResult<Self> {
        let role = Self::new(name.to_string());
        if !role.is_recognized() {
            return Err(DomainError::validation(format!(
                "unknown role {name:?} (expected one of: Admin, Sales, Designer)"
            )));
        }
        Ok(role)
    }

    pub fn is_recognized(&self) -> bool {
        Self::RECOGNIZED.contains(self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
