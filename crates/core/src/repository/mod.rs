//! Repository module
//!
//! The cache coordinator over the task data sources and the provider that
//! owns its lifetime.

mod provider;
mod tasks;
#[cfg(test)]
pub(crate) mod test_support;

pub use provider::{SharedTasksRepository, TasksRepositoryProvider};
pub use tasks::TasksRepository;
