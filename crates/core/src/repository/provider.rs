//! Repository lifetime management
//!
//! The application owns one provider and hands the shared repository to every
//! consumer; tests reset it to start from a clean cache.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::tasks::TasksRepository;
use crate::task::TasksDataSource;

/// Repository handle shared between consumers; the mutex serializes access
pub type SharedTasksRepository = Arc<Mutex<TasksRepository>>;

/// Lazily builds one repository and keeps returning it until reset
#[derive(Default)]
pub struct TasksRepositoryProvider {
    instance: RwLock<Option<SharedTasksRepository>>,
}

impl TasksRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the held repository, building it from `local` and `remote` on
    /// first use.
    ///
    /// Once a repository exists the adapters passed here are ignored.
    pub async fn get_or_init(
        &self,
        local: Arc<dyn TasksDataSource>,
        remote: Arc<dyn TasksDataSource>,
    ) -> SharedTasksRepository {
        if let Some(existing) = self.current().await {
            return existing;
        }

        let mut instance = self.instance.write().await;
        // Another caller may have won the race for the write lock
        if let Some(existing) = instance.as_ref() {
            return Arc::clone(existing);
        }

        debug!("Creating tasks repository");
        let repository = Arc::new(Mutex::new(TasksRepository::new(local, remote)));
        *instance = Some(Arc::clone(&repository));
        repository
    }

    /// The held repository, if one has been built
    pub async fn current(&self) -> Option<SharedTasksRepository> {
        self.instance.read().await.clone()
    }

    /// Drop the held repository so the next access builds a fresh one
    pub async fn reset(&self) {
        if self.instance.write().await.take().is_some() {
            debug!("Tasks repository reset");
        }
    }
}
