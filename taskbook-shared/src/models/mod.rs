/// Database models
///
/// - `task`: to-do items owned by users
/// - `user`: user accounts

pub mod task;
pub mod user;

pub use task::{CreateTask, Task, UpdateTask};
pub use user::{CreateUser, NewUser, UpdateUser, User};
