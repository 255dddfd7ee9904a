//! Application state

use std::sync::Arc;

use todo_sync_core::task::{FileTasksDataSource, SimulatedRemoteDataSource, TasksDataSource};
use todo_sync_core::{SharedTasksRepository, SyncConfig, TasksRepositoryProvider};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    local: Arc<dyn TasksDataSource>,
    remote: Arc<dyn TasksDataSource>,
    repositories: TasksRepositoryProvider,
}

impl AppState {
    /// Create a new AppState from the given configuration
    pub async fn new(config: &SyncConfig) -> todo_sync_core::Result<Self> {
        let local = FileTasksDataSource::open(config.local_store_path()).await?;
        let remote = if config.seed_remote {
            SimulatedRemoteDataSource::with_sample_tasks(config.remote_latency)
        } else {
            SimulatedRemoteDataSource::new(config.remote_latency)
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                local: Arc::new(local),
                remote: Arc::new(remote),
                repositories: TasksRepositoryProvider::new(),
            }),
        })
    }

    /// Get the tasks repository, building it on first use
    pub async fn tasks(&self) -> SharedTasksRepository {
        self.inner
            .repositories
            .get_or_init(
                Arc::clone(&self.inner.local),
                Arc::clone(&self.inner.remote),
            )
            .await
    }
}

