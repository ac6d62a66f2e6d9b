//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - JOINs for list operations (no N+1)
//! - ON CONFLICT upserts for the controlled vocabularies
//! - Transactions for multi-step listing writes

use thiserror::Error;

pub mod admin_users;
pub mod locations;
pub mod properties;
pub mod property_types;

pub use admin_users::{AdminUser, AdminUserRepo};
pub use locations::{LocationRecord, LocationRepo};
pub use properties::{PropertyImage, PropertyRecord, PropertyRepo};
pub use property_types::{PropertyTypeRecord, PropertyTypeRepo};

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    /// True when the underlying error is a unique-constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Sqlx(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }
}
