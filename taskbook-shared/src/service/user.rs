/// User service
///
/// Business rules over a [`UserRepository`]: email/password validation,
/// password hashing, field-level merge on update and the explicit
/// user-to-tasks query.
///
/// Password hashing is CPU-bound, so it runs on the blocking thread pool.

use std::sync::Arc;

use serde::Serialize;
use validator::ValidateEmail;
use tracing::{debug, info};

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::error::{ServiceError, ServiceResult};
use crate::merge::{is_blank, merge_text, provided_text};
use crate::models::{CreateUser, NewUser, Task, UpdateUser, User};
use crate::repository::{TaskRepository, UserRepository};

/// A user, optionally with the user's tasks
#[derive(Debug, Clone, Serialize)]
pub struct UserWithTasks {
    #[serde(flatten)]
    pub user: User,

    /// Present only when tasks were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
}

/// User operations used by the HTTP layer
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { users, tasks }
    }

    /// Creates a user, hashing the password
    ///
    /// # Errors
    ///
    /// - `Validation` if the email is empty or malformed, or the password is empty
    /// - `PasswordHash` if hashing fails
    /// - `Storage` on any persistence failure
    pub async fn create(&self, data: CreateUser) -> ServiceResult<User> {
        check_email(&data.email)?;
        if is_blank(&data.password) {
            return Err(ServiceError::validation("password must not be empty"));
        }

        let password_hash = hash_in_background(data.password).await?;
        let user = self
            .users
            .create(NewUser {
                email: data.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn list(&self) -> ServiceResult<Vec<User>> {
        self.users.list().await
    }

    /// Fetches a user, and the user's tasks when `include_tasks` is set
    ///
    /// Tasks are loaded with a second, explicit query.
    pub async fn get_by_id(&self, id: i64, include_tasks: bool) -> ServiceResult<UserWithTasks> {
        let user = self.users.find_by_id(id).await?;

        let tasks = if include_tasks {
            Some(self.tasks.list_by_owner(user.id).await?)
        } else {
            None
        };

        Ok(UserWithTasks { user, tasks })
    }

    /// Merges `patch` into the stored user
    ///
    /// Blank or absent fields leave the stored value unchanged. A password
    /// that differs from the stored one is hashed before it is stored; the
    /// current password is not a change.
    pub async fn update_by_id(&self, id: i64, patch: UpdateUser) -> ServiceResult<User> {
        if let Some(email) = provided_text(patch.email.as_deref()) {
            check_email(email)?;
        }

        let mut user = self.users.find_by_id(id).await?;
        let mut changed = merge_text(&mut user.email, patch.email);

        if let Some(password) = patch.password.filter(|p| !is_blank(p)) {
            if !matches_in_background(password.clone(), user.password_hash.clone()).await? {
                user.password_hash = hash_in_background(password).await?;
                changed = true;
            }
        }

        if !changed {
            debug!(user_id = id, "User patch changed nothing");
            return Ok(user);
        }

        let saved = self.users.save(&user).await?;
        info!(user_id = id, "User updated");
        Ok(saved)
    }

    /// Deletes a user and, through the store, the user's tasks
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist or is removed concurrently.
    pub async fn delete_by_id(&self, id: i64) -> ServiceResult<()> {
        self.users.find_by_id(id).await?;
        self.users.delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Returns the tasks of an existing user
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn tasks_for_user(&self, user_id: i64) -> ServiceResult<Vec<Task>> {
        let user = self.users.find_by_id(user_id).await?;
        self.tasks.list_by_owner(user.id).await
    }
}

/// Same rule as `#[validate(email)]` at the HTTP edge
fn check_email(email: &str) -> ServiceResult<()> {
    if is_blank(email) {
        return Err(ServiceError::validation("email must not be empty"));
    }
    if !email.validate_email() {
        return Err(ServiceError::validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

async fn matches_in_background(password: String, hash: String) -> ServiceResult<bool> {
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::VerifyError(format!("Verification task failed: {}", e)))??;
    Ok(matches)
}

async fn hash_in_background(password: String) -> ServiceResult<String> {
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))??;
    Ok(hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_email() {
        assert!(check_email("user@example.com").is_ok());

        for bad in ["", "   ", "not-an-email", "@", "a@", "@example.com"] {
            assert!(
                matches!(check_email(bad), Err(ServiceError::Validation(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
