/// Task model and database operations
///
/// A task is a single to-do item owned by a user. The functions on [`Task`]
/// are thin wrappers around SQL and return raw `sqlx` results; the
/// repository layer turns those into domain errors.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     task TEXT NOT NULL,
///     is_done BOOLEAN NOT NULL DEFAULT FALSE,
///     owner_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::models::task::{CreateTask, Task};
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     description: "buy milk".to_string(),
///     done: false,
///     owner_id: 1,
/// }).await?;
///
/// let mine = Task::list_by_owner(&pool, task.owner_id).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::merge::{merge_flag, merge_text};

/// Task model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Surrogate id assigned by the store
    pub id: i64,

    /// Free-form text of the task (column `task`)
    #[sqlx(rename = "task")]
    pub description: String,

    /// Completion flag (column `is_done`)
    #[sqlx(rename = "is_done")]
    pub done: bool,

    /// Owning user
    pub owner_id: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTask {
    pub description: String,

    #[serde(default)]
    pub done: bool,

    pub owner_id: i64,
}

/// Partial update for a task
///
/// `None` leaves a field untouched. A blank description is treated the same
/// as `None`; a provided `done` is always applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTask {
    pub description: Option<String>,

    pub done: Option<bool>,
}

impl Task {
    /// Merges `patch` into this task, returning true if anything changed
    pub fn apply(&mut self, patch: UpdateTask) -> bool {
        let description_changed = merge_text(&mut self.description, patch.description);
        let done_changed = merge_flag(&mut self.done, patch.done);
        description_changed || done_changed
    }

    /// Inserts a new task and returns the stored row
    ///
    /// # Errors
    ///
    /// Returns a database error if the owner does not exist (foreign key
    /// violation) or the connection fails.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (task, is_done, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, task, is_done, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.description)
        .bind(data.done)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, task, is_done, owner_id, created_at, updated_at
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, task, is_done, owner_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists the tasks owned by `owner_id`
    ///
    /// An unknown owner yields an empty list.
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, task, is_done, owner_id, created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Writes the mutable fields of `task` back to its row
    ///
    /// Returns `None` if the row no longer exists.
    pub async fn save(pool: &PgPool, task: &Task) -> Result<Option<Self>, sqlx::Error> {
        let saved = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET task = $2, is_done = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, task, is_done, owner_id, created_at, updated_at
            "#,
        )
        .bind(task.id)
        .bind(&task.description)
        .bind(task.done)
        .fetch_optional(pool)
        .await?;

        Ok(saved)
    }

    /// Deletes a task by id
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
