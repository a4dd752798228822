/// User endpoints
///
/// # Endpoints
///
/// - `POST /users` - Create user
/// - `GET /users` - List users
/// - `GET /users/:id` - Get user, with `?include_tasks=true` to embed tasks
/// - `PATCH /users/:id` - Partially update user
/// - `DELETE /users/:id` - Delete user and their tasks
/// - `GET /users/:id/tasks` - List the user's tasks
///
/// Password hashes are never part of a response.

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{AppJson, AppPath, AppQuery},
    routes::{require_positive_id, tasks::TaskResponse},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskbook_shared::models::{CreateUser, UpdateUser, User};
use taskbook_shared::service::UserWithTasks;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Partial user update
///
/// Blank strings count as absent. The email rule is applied by the user
/// service, the same one `#[validate(email)]` uses on create.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,

    pub password: Option<String>,
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,

    pub email: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Only present when requested with `include_tasks=true`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tasks: Option<Vec<TaskResponse>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
            tasks: None,
        }
    }
}

impl From<UserWithTasks> for UserResponse {
    fn from(found: UserWithTasks) -> Self {
        let tasks = found
            .tasks
            .map(|tasks| tasks.into_iter().map(TaskResponse::from).collect());

        Self {
            tasks,
            ..Self::from(found.user)
        }
    }
}

/// Query parameters for `GET /users/:id`
#[derive(Debug, Default, Deserialize)]
pub struct GetUserQuery {
    #[serde(default)]
    pub include_tasks: bool,
}

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "email": "ada@example.com", "password": "secret" }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: invalid email or empty password
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let user = state
        .users
        .create(CreateUser {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// List users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a single user
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppQuery(query): AppQuery<GetUserQuery>,
) -> ApiResult<Json<UserResponse>> {
    let id = require_positive_id(id)?;
    let found = state.users.get_by_id(id, query.include_tasks).await?;

    Ok(Json(found.into()))
}

/// Partially update a user
///
/// A new non-blank `password` is rehashed; a blank one or the current one
/// is ignored.
///
/// # Errors
///
/// - `404 Not Found`: no user with that id
/// - `422 Unprocessable Entity`: malformed email
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let id = require_positive_id(id)?;
    let user = state
        .users
        .update_by_id(
            id,
            UpdateUser {
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// Delete a user
///
/// The user's tasks are deleted with them.
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StatusCode> {
    let id = require_positive_id(id)?;
    state.users.delete_by_id(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List a user's tasks
///
/// Unlike `GET /tasks?user_id=N`, an unknown user is `404 Not Found`.
pub async fn list_user_tasks(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let id = require_positive_id(id)?;
    let tasks = state.users.tasks_for_user(id).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}
