/// In-process entity store
///
/// `MemoryStore` implements both [`TaskRepository`] and [`UserRepository`]
/// over ordered maps behind a single `RwLock`, and enforces the same rules as
/// the PostgreSQL schema:
///
/// - ids are assigned sequentially from 1 and never reused
/// - a task's owner must exist when the task is created
/// - deleting a user deletes the user's tasks
///
/// Cloning a `MemoryStore` yields another handle to the same data, so one
/// instance can back both services.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use taskbook_shared::repository::MemoryStore;
/// use taskbook_shared::service::{TaskService, UserService};
///
/// let store = Arc::new(MemoryStore::new());
/// let tasks = TaskService::new(store.clone());
/// let users = UserService::new(store.clone(), store);
/// ```

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{TaskRepository, UserRepository};
use crate::error::{Entity, ServiceError, ServiceResult};
use crate::models::{CreateTask, NewUser, Task, User};

#[derive(Debug, Default)]
struct Tables {
    tasks: BTreeMap<i64, Task>,
    users: BTreeMap<i64, User>,
    last_task_id: i64,
    last_user_id: i64,
}

/// Memory-backed task and user store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn create(&self, data: CreateTask) -> ServiceResult<Task> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&data.owner_id) {
            return Err(ServiceError::validation(format!(
                "user {} does not exist",
                data.owner_id
            )));
        }

        tables.last_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: tables.last_task_id,
            description: data.description,
            done: data.done,
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn list(&self) -> ServiceResult<Vec<Task>> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.values().cloned().collect())
    }

    async fn list_by_owner(&self, owner_id: i64) -> ServiceResult<Vec<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|task| task.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<Task> {
        let tables = self.tables.read().await;
        tables
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(Entity::Task, id))
    }

    async fn save(&self, task: &Task) -> ServiceResult<Task> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .tasks
            .get_mut(&task.id)
            .ok_or_else(|| ServiceError::not_found(Entity::Task, task.id))?;

        stored.description = task.description.clone();
        stored.done = task.done;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found(Entity::Task, id))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, data: NewUser) -> ServiceResult<User> {
        let mut tables = self.tables.write().await;

        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.last_user_id,
            email: data.email,
            password_hash: data.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn list(&self) -> ServiceResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> ServiceResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(Entity::User, id))
    }

    async fn save(&self, user: &User) -> ServiceResult<User> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .users
            .get_mut(&user.id)
            .ok_or_else(|| ServiceError::not_found(Entity::User, user.id))?;

        stored.email = user.email.clone();
        stored.password_hash = user.password_hash.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> ServiceResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(ServiceError::not_found(Entity::User, id));
        }

        tables.tasks.retain(|_, task| task.owner_id != id);
        Ok(())
    }
}
