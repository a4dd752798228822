/// Business-rule layer
///
/// Services own the merge policy for partial updates and the cross-entity
/// query from a user to the user's tasks. They receive their repositories at
/// construction and hold no other state, so they are cheap to clone into
/// request handlers.

pub mod task;
pub mod user;

pub use task::TaskService;
pub use user::{UserService, UserWithTasks};
