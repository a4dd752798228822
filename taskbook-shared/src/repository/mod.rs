/// Persistence ports for tasks and users
///
/// Each trait covers the typed operations one entity needs. Implementations
/// normalize "no rows" into [`ServiceError::NotFound`] and foreign-key
/// violations into [`ServiceError::Validation`], so services never look at
/// store-specific errors.
///
/// # Implementations
///
/// - `postgres`: `PgTaskRepository` / `PgUserRepository` over a `PgPool`
/// - `memory`: `MemoryStore`, an in-process store with the same constraints
///
/// [`ServiceError::NotFound`]: crate::error::ServiceError::NotFound
/// [`ServiceError::Validation`]: crate::error::ServiceError::Validation

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{CreateTask, NewUser, Task, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PgTaskRepository, PgUserRepository};

/// Task persistence contract
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its assigned id
    ///
    /// # Errors
    ///
    /// `Validation` when the owner does not exist.
    async fn create(&self, data: CreateTask) -> ServiceResult<Task>;

    /// Returns every task
    async fn list(&self) -> ServiceResult<Vec<Task>>;

    /// Returns the tasks owned by `owner_id`, empty for an unknown owner
    async fn list_by_owner(&self, owner_id: i64) -> ServiceResult<Vec<Task>>;

    /// # Errors
    ///
    /// `NotFound` when no task has this id.
    async fn find_by_id(&self, id: i64) -> ServiceResult<Task>;

    /// Persists the mutable fields of an existing task
    ///
    /// # Errors
    ///
    /// `NotFound` when the row disappeared since it was read.
    async fn save(&self, task: &Task) -> ServiceResult<Task>;

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing was deleted.
    async fn delete(&self, id: i64) -> ServiceResult<()>;
}

/// User persistence contract
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, data: NewUser) -> ServiceResult<User>;

    async fn list(&self) -> ServiceResult<Vec<User>>;

    /// # Errors
    ///
    /// `NotFound` when no user has this id.
    async fn find_by_id(&self, id: i64) -> ServiceResult<User>;

    /// # Errors
    ///
    /// `NotFound` when the row disappeared since it was read.
    async fn save(&self, user: &User) -> ServiceResult<User>;

    /// Deletes a user together with the user's tasks
    ///
    /// # Errors
    ///
    /// `NotFound` when nothing was deleted.
    async fn delete(&self, id: i64) -> ServiceResult<()>;
}
