/// Task endpoints
///
/// # Endpoints
///
/// - `POST /tasks` - Create task
/// - `GET /tasks` - List tasks, optionally filtered with `?user_id=N`
/// - `GET /tasks/:id` - Get task
/// - `PATCH /tasks/:id` - Partially update task
/// - `DELETE /tasks/:id` - Delete task

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{AppJson, AppPath, AppQuery},
    routes::require_positive_id,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskbook_shared::models::{CreateTask, Task, UpdateTask};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task description
    #[validate(length(min = 1, message = "Task description must not be empty"))]
    pub task: String,

    #[serde(default)]
    pub is_done: bool,

    /// Owning user
    #[validate(range(min = 1, message = "user_id must be a positive integer"))]
    pub user_id: i64,
}

/// Partial task update
///
/// Absent fields leave the stored value untouched, as does a blank `task`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub task: Option<String>,

    pub is_done: Option<bool>,
}

/// Task as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i64,

    pub task: String,

    pub is_done: bool,

    pub user_id: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            task: task.description,
            is_done: task.done,
            user_id: task.owner_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Query parameters for `GET /tasks`
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Restrict the listing to one owner
    pub user_id: Option<i64>,
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// { "task": "buy milk", "is_done": false, "user_id": 1 }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: empty description or unknown `user_id`
pub async fn create_task(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let task = state
        .tasks
        .create(CreateTask {
            description: req.task,
            done: req.is_done,
            owner_id: req.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// List tasks
///
/// With `?user_id=N` only that user's tasks are returned. An unknown user
/// yields an empty list rather than 404.
pub async fn list_tasks(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListTasksQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = match query.user_id {
        Some(owner_id) => state.tasks.list_by_owner(owner_id).await?,
        None => state.tasks.list().await?,
    };

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Get a single task
pub async fn get_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let id = require_positive_id(id)?;
    let task = state.tasks.get_by_id(id).await?;

    Ok(Json(task.into()))
}

/// Partially update a task
///
/// # Endpoint
///
/// ```text
/// PATCH /tasks/1
/// Content-Type: application/json
///
/// { "is_done": true }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed id or body
/// - `404 Not Found`: no task with that id
pub async fn update_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let id = require_positive_id(id)?;
    let task = state
        .tasks
        .update_by_id(
            id,
            UpdateTask {
                description: req.task,
                done: req.is_done,
            },
        )
        .await?;

    Ok(Json(task.into()))
}

/// Delete a task
///
/// Returns `204 No Content`, or `404 Not Found` when the task is absent.
pub async fn delete_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StatusCode> {
    let id = require_positive_id(id)?;
    state.tasks.delete_by_id(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
