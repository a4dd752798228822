/// Task service
///
/// Business rules over a [`TaskRepository`]: input validation on create and
/// field-level merge on update. Errors from the repository are passed
/// through unchanged.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::merge::is_blank;
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;

/// Task operations used by the HTTP layer
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    /// Creates a task
    ///
    /// # Errors
    ///
    /// - `Validation` if the description is empty or the owner does not exist
    /// - `Storage` on any other persistence failure
    pub async fn create(&self, data: CreateTask) -> ServiceResult<Task> {
        if is_blank(&data.description) {
            return Err(ServiceError::validation("task description must not be empty"));
        }

        let task = self.repo.create(data).await?;
        info!(task_id = task.id, owner_id = task.owner_id, "Task created");
        Ok(task)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Task>> {
        self.repo.list().await
    }

    /// Lists the tasks of one owner
    ///
    /// Unlike [`crate::service::UserService::tasks_for_user`], an unknown
    /// owner is not an error here; the result is simply empty.
    pub async fn list_by_owner(&self, owner_id: i64) -> ServiceResult<Vec<Task>> {
        self.repo.list_by_owner(owner_id).await
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Task> {
        self.repo.find_by_id(id).await
    }

    /// Merges `patch` into the stored task
    ///
    /// A non-blank description replaces the stored one; a provided `done`
    /// is always applied. A patch that changes nothing is not written.
    ///
    /// # Errors
    ///
    /// `NotFound` if the task does not exist or disappears before the write.
    pub async fn update_by_id(&self, id: i64, patch: UpdateTask) -> ServiceResult<Task> {
        let mut task = self.repo.find_by_id(id).await?;

        if !task.apply(patch) {
            debug!(task_id = id, "Task patch changed nothing");
            return Ok(task);
        }

        let saved = self.repo.save(&task).await?;
        info!(task_id = id, done = saved.done, "Task updated");
        Ok(saved)
    }

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// `NotFound` if the task does not exist, including when it is removed
    /// concurrently between the lookup and the delete.
    pub async fn delete_by_id(&self, id: i64) -> ServiceResult<()> {
        self.repo.find_by_id(id).await?;
        self.repo.delete(id).await?;
        info!(task_id = id, "Task deleted");
        Ok(())
    }
}
