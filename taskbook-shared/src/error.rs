/// Domain error types shared by repositories and services
///
/// Repositories translate store-specific conditions into these variants:
/// "no rows" becomes [`ServiceError::NotFound`] and foreign-key violations
/// become [`ServiceError::Validation`]. Services pass errors through
/// unchanged, so the HTTP layer is the only place that maps a variant to a
/// status code.
///
/// # Example
///
/// ```
/// use taskbook_shared::error::{Entity, ServiceError};
///
/// let err = ServiceError::not_found(Entity::Task, 7);
/// assert!(err.is_not_found());
/// assert_eq!(err.to_string(), "task 7 not found");
/// ```

use std::fmt;

use crate::auth::password::PasswordError;

/// Result alias used by repositories and services
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Task,
    User,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Task => "task",
            Entity::User => "user",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the repository and service layers
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The row does not exist, or vanished between lookup and write
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    /// Input rejected before or by the store (empty fields, unknown owner)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Any other persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Password could not be hashed
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] PasswordError),
}

impl ServiceError {
    pub fn not_found(entity: Entity, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    /// Maps a sqlx error for a lookup keyed by `id`
    ///
    /// `RowNotFound` becomes `NotFound`, a foreign-key violation becomes
    /// `Validation`, everything else stays a storage error.
    pub fn from_store(err: sqlx::Error, entity: Entity, id: i64) -> Self {
        match err {
            sqlx::Error::RowNotFound => ServiceError::not_found(entity, id),
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                ServiceError::Validation(format!(
                    "{} references a row that does not exist",
                    entity
                ))
            }
            other => ServiceError::Storage(other),
        }
    }
}
