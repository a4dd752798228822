/// Database bootstrap
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: embedded schema migrations
///
/// Row-level SQL lives with the models in [`crate::models`].

pub mod migrations;
pub mod pool;
