//! # Taskbook Shared Library
//!
//! Domain core of the Taskbook task/user API: models, persistence ports and
//! their PostgreSQL and in-memory implementations, and the services that
//! apply business rules on top.
//!
//! ## Module Organization
//!
//! - `models`: task and user rows with their SQL
//! - `repository`: persistence traits plus `postgres` and `memory` stores
//! - `service`: task and user services (validation, merge, cross-entity queries)
//! - `merge`: field-level merge rules for partial updates
//! - `error`: domain error taxonomy
//! - `auth`: password hashing
//! - `db`: pool creation and migrations

pub mod auth;
pub mod db;
pub mod error;
pub mod merge;
pub mod models;
pub mod repository;
pub mod service;

/// Current version of the Taskbook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
