//! Simulated remote task backend
//!
//! Stands in for a network service: reads are delayed by a configurable
//! latency and the whole service can be taken offline.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use super::data_source::TasksDataSource;
use super::model::Task;
use crate::{Error, Result};

/// In-process remote backend with simulated latency and availability
pub struct SimulatedRemoteDataSource {
    tasks: RwLock<IndexMap<String, Task>>,
    latency: Duration,
    available: AtomicBool,
}

impl SimulatedRemoteDataSource {
    /// Create an empty backend that answers reads after `latency`
    pub fn new(latency: Duration) -> Self {
        Self {
            tasks: RwLock::new(IndexMap::new()),
            latency,
            available: AtomicBool::new(true),
        }
    }

    /// Create a backend pre-populated with sample tasks
    pub fn with_sample_tasks(latency: Duration) -> Self {
        let tasks = [
            Task::new("Build tower in Pisa")
                .with_description("Ground looks good, no foundation work required."),
            Task::new("Finish bridge in Tacoma")
                .with_description("Found awesome girders at half the cost!"),
        ];
        Self::with_tasks(latency, tasks)
    }

    /// Create a backend holding `tasks`
    pub fn with_tasks(latency: Duration, tasks: impl IntoIterator<Item = Task>) -> Self {
        let remote = Self::new(latency);
        let tasks = tasks
            .into_iter()
            .map(|t| (t.id().to_string(), t))
            .collect();
        Self {
            tasks: RwLock::new(tasks),
            ..remote
        }
    }

    /// Take the backend offline (`false`) or bring it back (`true`)
    ///
    /// While offline every read resolves to [`Error::NotAvailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn simulate_round_trip(&self) -> Result<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.is_available() {
            Ok(())
        } else {
            debug!("Remote backend offline");
            Err(Error::NotAvailable)
        }
    }

    async fn set_completed(&self, id: &str, completed: bool) {
        let mut tasks = self.tasks.write().await;
        if let Some(task) = tasks.get_mut(id) {
            *task = task.clone().with_completed(completed);
        }
    }
}

#[async_trait]
impl TasksDataSource for SimulatedRemoteDataSource {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.simulate_round_trip().await?;
        let tasks = self.tasks.read().await;
        Ok(tasks.values().cloned().collect())
    }

    async fn get_task(&self, id: &str) -> Result<Task> {
        self.simulate_round_trip().await?;
        let tasks = self.tasks.read().await;
        tasks.get(id).cloned().ok_or(Error::NotAvailable)
    }

    async fn save_task(&self, task: &Task) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        tasks.insert(task.id().to_string(), task.clone());
        Ok(())
    }

    async fn complete_task(&self, task: &Task) -> Result<()> {
        self.set_completed(task.id(), true).await;
        Ok(())
    }

    async fn complete_task_by_id(&self, _id: &str) -> Result<()> {
        // The repository resolves the entity and calls complete_task instead
        Ok(())
    }

    async fn activate_task(&self, task: &Task) -> Result<()> {
        self.set_completed(task.id(), false).await;
        Ok(())
    }

    async fn activate_task_by_id(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn clear_completed_tasks(&self) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        tasks.retain(|_, task| task.is_active());
        Ok(())
    }

    async fn refresh_tasks(&self) -> Result<()> {
        Ok(())
    }

    async fn delete_all_tasks(&self) -> Result<()> {
        self.tasks.write().await.clear();
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        self.tasks.write().await.shift_remove(id);
        Ok(())
    }
}
