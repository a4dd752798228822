/// PostgreSQL-backed repositories
///
/// Thin adapters from the model-level SQL in [`crate::models`] to the
/// repository traits. The pool is passed in at construction; there is no
/// global handle.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskbook_shared::repository::{PgTaskRepository, PgUserRepository};
/// use taskbook_shared::service::{TaskService, UserService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let tasks = Arc::new(PgTaskRepository::new(pool.clone()));
/// let users = Arc::new(PgUserRepository::new(pool));
///
/// let task_service = TaskService::new(tasks.clone());
/// let user_service = UserService::new(users, tasks);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{TaskRepository, UserRepository};
use crate::error::{Entity, ServiceError, ServiceResult};
use crate::models::{CreateTask, NewUser, Task, User};

/// Task repository over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, data: CreateTask) -> ServiceResult<Task> {
        let owner_id = data.owner_id;
        Task::create(&self.pool, data).await.map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                ServiceError::validation(format!("user {} does not exist", owner_id))
            }
            other => ServiceError::Storage(other),
        })
    }

    async fn list(&self) -> ServiceResult<Vec<Task>> {
        Ok(Task::list(&self.pool).await?)
    }

    async fn list_by_owner(&self, owner_id: i64) -> ServiceResult<Vec<Task>> {
        Ok(Task::list_by_owner(&self.pool, owner_id).await?)
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<Task> {
        debug!(task_id = id, "Looking up task");
        Task::find_by_id(&self.pool, id)
            .await
            .map_err(|err| ServiceError::from_store(err, Entity::Task, id))?
            .ok_or_else(|| ServiceError::not_found(Entity::Task, id))
    }

    async fn save(&self, task: &Task) -> ServiceResult<Task> {
        Task::save(&self.pool, task)
            .await
            .map_err(|err| ServiceError::from_store(err, Entity::Task, task.id))?
            .ok_or_else(|| ServiceError::not_found(Entity::Task, task.id))
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        let deleted = Task::delete(&self.pool, id)
            .await
            .map_err(|err| ServiceError::from_store(err, Entity::Task, id))?;

        if deleted {
            Ok(())
        } else {
            Err(ServiceError::not_found(Entity::Task, id))
        }
    }
}

/// User repository over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, data: NewUser) -> ServiceResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn list(&self) -> ServiceResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<User> {
        debug!(user_id = id, "Looking up user");
        User::find_by_id(&self.pool, id)
            .await
            .map_err(|err| ServiceError::from_store(err, Entity::User, id))?
            .ok_or_else(|| ServiceError::not_found(Entity::User, id))
    }

    async fn save(&self, user: &User) -> ServiceResult<User> {
        User::save(&self.pool, user)
            .await
            .map_err(|err| ServiceError::from_store(err, Entity::User, user.id))?
            .ok_or_else(|| ServiceError::not_found(Entity::User, user.id))
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        let deleted = User::delete(&self.pool, id)
            .await
            .map_err(|err| ServiceError::from_store(err, Entity::User, id))?;

        if deleted {
            Ok(())
        } else {
            Err(ServiceError::not_found(Entity::User, id))
        }
    }
}
