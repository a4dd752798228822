/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `tasks`: Task CRUD endpoints
/// - `users`: User CRUD endpoints and the per-user task listing

pub mod health;
pub mod tasks;
pub mod users;

use crate::error::{ApiError, ApiResult};

/// Rejects ids the store can never have assigned
pub(crate) fn require_positive_id(id: i64) -> ApiResult<i64> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ApiError::BadRequest(format!(
            "id must be a positive integer, got {}",
            id
        )))
    }
}
