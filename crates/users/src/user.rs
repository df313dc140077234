//! User records.

use serde::{Deserialize, Serialize};

use mason_core::{required_text, DomainResult, Entity, UserId};

use crate::Role;

/// A validated user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl NewUser {
    /// Validate the form fields of a new user. Name and email are trimmed.
    ///
    /// Email uniqueness is a storage constraint and is not checked here.
    pub fn new(name: &str, email: &str, role: &str) -> DomainResult<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            email: required_text("email", email)?,
            role: Role::recognized(role)?,
        })
    }
}

/// Persisted system user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            role: new.role,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    const KIND: &'static str = "user";

    fn id(&self) -> Self::Id {
        self.id
    }
}
