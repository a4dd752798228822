/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskbook_api::{app::{build_router, AppState}, config::Config};
/// use taskbook_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskbook_shared::repository::{MemoryStore, PgTaskRepository, PgUserRepository};
use taskbook_shared::service::{TaskService, UserService};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor; all fields
/// are reference-counted handles.
#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,

    pub users: UserService,

    /// Database pool, absent when running on the memory store
    pub db: Option<PgPool>,

    pub config: Arc<Config>,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn new(db: PgPool, config: Config) -> Self {
        let task_repo = Arc::new(PgTaskRepository::new(db.clone()));
        let user_repo = Arc::new(PgUserRepository::new(db.clone()));

        Self {
            tasks: TaskService::new(task_repo.clone()),
            users: UserService::new(user_repo, task_repo),
            db: Some(db),
            config: Arc::new(config),
        }
    }

    /// State backed by a fresh in-process store
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());

        Self {
            tasks: TaskService::new(store.clone()),
            users: UserService::new(store.clone(), store),
            db: None,
            config: Arc::new(config),
        }
    }
}

/// Builds the router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// ├── /tasks
/// │   ├── POST   /              create
/// │   ├── GET    /              list (?user_id=N filters by owner)
/// │   ├── GET    /:id           fetch one
/// │   ├── PATCH  /:id           partial update
/// │   └── DELETE /:id           delete
/// └── /users
///     ├── POST   /              create
///     ├── GET    /              list
///     ├── GET    /:id           fetch one (?include_tasks=true)
///     ├── PATCH  /:id           partial update
///     ├── DELETE /:id           delete (cascades to tasks)
///     └── GET    /:id/tasks     the user's tasks
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .patch(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        );

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/:id",
            get(routes::users::get_user)
                .patch(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route("/:id/tasks", get(routes::users::list_user_tasks));

    let cors = build_cors(&state.config.api.cors_origins);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/tasks", task_routes)
        .nest("/users", user_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
