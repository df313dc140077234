//! Storage error model.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | SQLite extended code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique / primary key) | `2067`, `1555` | `ConstraintViolation(Unique)` |
//! | Database (not null) | `1299` | `ConstraintViolation(NotNull)` |
//! | Database (check) | `275` | `ConstraintViolation(Check)` |
//! | Database (other constraint) | `19 + n*256` | `ConstraintViolation(Other)` |
//! | Database (anything else) | any | `Unavailable` |
//! | RowNotFound | N/A | `NotFound` |
//! | ColumnDecode / Decode / ColumnNotFound | N/A | `Decode` |
//! | PoolClosed / PoolTimedOut / Io / other | N/A | `Unavailable` |

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Kind of constraint the store rejected a write with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Constraint {
    Unique,
    NotNull,
    Check,
    Other,
}

impl core::fmt::Display for Constraint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Constraint::Unique => "unique",
            Constraint::NotNull => "not null",
            Constraint::Check => "check",
            Constraint::Other => "constraint",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A write broke a non-null, uniqueness or check rule. Nothing was written.
    #[error("{constraint} constraint violated: {message}")]
    ConstraintViolation {
        constraint: Constraint,
        message: String,
    },

    #[error("record not found")]
    NotFound,

    /// A stored row could not be turned back into a domain value.
    #[error("failed to decode stored record: {0}")]
    Decode(String),

    /// The database could not be reached or used (lock, permissions, closed pool).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn constraint(constraint: Constraint, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            constraint,
            message: message.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StoreError::ConstraintViolation {
                constraint: Constraint::Unique,
                ..
            }
        )
    }
}

/// Primary result code shared by every `SQLITE_CONSTRAINT_*` extended code.
const SQLITE_CONSTRAINT: i32 = 19;

fn constraint_from_code(code: &str) -> Option<Constraint> {
    let code: i32 = code.parse().ok()?;
    match code {
        2067 | 1555 => Some(Constraint::Unique),
        1299 => Some(Constraint::NotNull),
        275 => Some(Constraint::Check),
        c if c & 0xff == SQLITE_CONSTRAINT => Some(Constraint::Other),
        _ => None,
    }
}

/// Map SQLx errors to StoreError.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.code().as_deref().and_then(constraint_from_code);
            match constraint {
                Some(constraint) => StoreError::constraint(constraint, db_err.message()),
                None => StoreError::Unavailable(format!(
                    "database error in {}: {}",
                    operation,
                    db_err.message()
                )),
            }
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Decode(format!("{operation}: {err}"))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        other => StoreError::Unavailable(format!("{operation}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_codes_map_to_constraints() {
        assert_eq!(constraint_from_code("2067"), Some(Constraint::Unique));
        assert_eq!(constraint_from_code("1555"), Some(Constraint::Unique));
        assert_eq!(constraint_from_code("1299"), Some(Constraint::NotNull));
        assert_eq!(constraint_from_code("275"), Some(Constraint::Check));
        // SQLITE_CONSTRAINT_FOREIGNKEY
        assert_eq!(constraint_from_code("787"), Some(Constraint::Other));
        // SQLITE_BUSY
        assert_eq!(constraint_from_code("5"), None);
        assert_eq!(constraint_from_code("nope"), None);
    }

    #[test]
    fn pool_closed_is_unavailable() {
        let err = map_sqlx_error("list_orders", sqlx::Error::PoolClosed);
        assert_eq!(
            err,
            StoreError::Unavailable("connection pool closed in list_orders".into())
        );
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(
            map_sqlx_error("get_order", sqlx::Error::RowNotFound),
            StoreError::NotFound
        );
    }
}
