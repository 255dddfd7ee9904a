//! Task data source trait
//!
//! Defines the capability set shared by the local store and the remote backend.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Storage tier the repository reads from and writes to.
///
/// Reads resolve to [`Error::NotAvailable`](crate::Error::NotAvailable) when
/// the tier has no answer; that is a signal to try the next tier, not a
/// failure. Writes are fire-and-forget from the repository's point of view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksDataSource: Send + Sync {
    /// Get all tasks
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get_task(&self, id: &str) -> Result<Task>;

    /// Insert or replace a task
    async fn save_task(&self, task: &Task) -> Result<()>;

    /// Mark the stored row for `task` completed
    async fn complete_task(&self, task: &Task) -> Result<()>;

    /// Mark a task completed by ID; tiers that need the entity may ignore this
    async fn complete_task_by_id(&self, id: &str) -> Result<()>;

    /// Mark the stored row for `task` active
    async fn activate_task(&self, task: &Task) -> Result<()>;

    /// Mark a task active by ID; tiers that need the entity may ignore this
    async fn activate_task_by_id(&self, id: &str) -> Result<()>;

    /// Delete every completed task
    async fn clear_completed_tasks(&self) -> Result<()>;

    async fn refresh_tasks(&self) -> Result<()>;

    async fn delete_all_tasks(&self) -> Result<()>;

    /// Delete a task by ID; unknown IDs are ignored
    async fn delete_task(&self, id: &str) -> Result<()>;
}
