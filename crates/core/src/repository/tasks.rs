//! Cache coordinator over the local and remote task data sources

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::task::{Task, TasksDataSource};
use crate::{Error, Result};

/// Single read/write surface over a local store and a remote backend.
///
/// Reads are served from an in-memory cache first, then the local store, then
/// the remote backend. Writes go to the remote backend, then the local store,
/// and always update the cache. Neither tier is rolled back when the other
/// fails.
///
/// Mutating operations take `&mut self`; share an instance through
/// [`SharedTasksRepository`](super::SharedTasksRepository).
pub struct TasksRepository {
    local: Arc<dyn TasksDataSource>,
    remote: Arc<dyn TasksDataSource>,
    cache: IndexMap<String, Task>,
    /// Set by [`refresh_tasks`](Self::refresh_tasks); the cache must not serve
    /// bulk reads until a remote fetch repopulates it.
    cache_is_dirty: bool,
}

impl TasksRepository {
    pub fn new(local: Arc<dyn TasksDataSource>, remote: Arc<dyn TasksDataSource>) -> Self {
        Self {
            local,
            remote,
            cache: IndexMap::new(),
            cache_is_dirty: false,
        }
    }

    /// Get all tasks.
    ///
    /// A clean cache answers without I/O. A dirty cache is rebuilt from the
    /// remote backend only, and the local store is then overwritten with the
    /// fetched set. Returns [`Error::NotAvailable`] when the remote backend
    /// has no data, leaving the cache dirty.
    pub async fn get_tasks(&mut self) -> Result<Vec<Task>> {
        if !self.cache_is_dirty {
            return Ok(self.cached_tasks());
        }

        let tasks = self.remote.list_tasks().await?;
        info!("Fetched {} tasks from remote", tasks.len());

        self.refresh_cache(&tasks);
        self.refresh_local_store(&tasks).await;
        Ok(self.cached_tasks())
    }

    /// Get a task by ID, trying the cache, then the local store, then the
    /// remote backend. A hit in either store is cached.
    pub async fn get_task(&mut self, id: &str) -> Result<Task> {
        if let Some(task) = self.cached_task(id) {
            debug!("Task {} served from cache", id);
            return Ok(task.clone());
        }

        let task = match self.local.get_task(id).await {
            Ok(task) => {
                debug!("Task {} loaded from local store", id);
                task
            }
            Err(e) if e.is_not_available() => {
                let task = self.remote.get_task(id).await?;
                debug!("Task {} loaded from remote", id);
                task
            }
            Err(e) => return Err(e),
        };

        self.cache.insert(task.id().to_string(), task.clone());
        Ok(task)
    }

    /// Save a task to both tiers and the cache.
    ///
    /// Both tiers are always written; the first failure is returned after the
    /// cache has been updated.
    pub async fn save_task(&mut self, task: &Task) -> Result<()> {
        let remote = self.remote.save_task(task).await;
        let local = self.local.save_task(task).await;

        self.cache.insert(task.id().to_string(), task.clone());
        remote.and(local)
    }

    /// Mark `task` completed in both tiers and cache the completed copy
    pub async fn complete_task(&mut self, task: &Task) -> Result<()> {
        let remote = self.remote.complete_task(task).await;
        let local = self.local.complete_task(task).await;

        let completed = task.as_completed();
        self.cache.insert(completed.id().to_string(), completed);
        remote.and(local)
    }

    /// Mark a cached task completed.
    ///
    /// Resolves `id` through the cache only, without falling back to either
    /// tier. Returns [`Error::TaskNotCached`] and touches nothing when the
    /// task is not cached; callers load it with [`get_task`](Self::get_task)
    /// first.
    pub async fn complete_task_by_id(&mut self, id: &str) -> Result<()> {
        let task = self.require_cached(id)?;
        self.complete_task(&task).await
    }

    /// Mark `task` active in both tiers and cache the active copy
    pub async fn activate_task(&mut self, task: &Task) -> Result<()> {
        let remote = self.remote.activate_task(task).await;
        let local = self.local.activate_task(task).await;

        let active = task.as_active();
        self.cache.insert(active.id().to_string(), active);
        remote.and(local)
    }

    /// Mark a cached task active. Same cache-only lookup as
    /// [`complete_task_by_id`](Self::complete_task_by_id).
    pub async fn activate_task_by_id(&mut self, id: &str) -> Result<()> {
        let task = self.require_cached(id)?;
        self.activate_task(&task).await
    }

    /// Delete completed tasks from both tiers and the cache
    pub async fn clear_completed_tasks(&mut self) -> Result<()> {
        let remote = self.remote.clear_completed_tasks().await;
        let local = self.local.clear_completed_tasks().await;

        self.cache.retain(|_, task| task.is_active());
        remote.and(local)
    }

    /// Mark the cache dirty so the next [`get_tasks`](Self::get_tasks) goes
    /// to the remote backend. Performs no I/O.
    pub fn refresh_tasks(&mut self) {
        self.cache_is_dirty = true;
    }

    /// Delete every task from both tiers and empty the cache.
    /// The dirty flag is left as it is.
    pub async fn delete_all_tasks(&mut self) -> Result<()> {
        let remote = self.remote.delete_all_tasks().await;
        let local = self.local.delete_all_tasks().await;

        self.cache.clear();
        remote.and(local)
    }

    /// Delete a task from both tiers and the cache; unknown IDs are ignored
    pub async fn delete_task(&mut self, id: &str) -> Result<()> {
        let remote = self.remote.delete_task(id).await;
        let local = self.local.delete_task(id).await;

        self.cache.shift_remove(id);
        remote.and(local)
    }

    /// Snapshot of the cached tasks in insertion order. Performs no I/O.
    pub fn cached_tasks(&self) -> Vec<Task> {
        self.cache.values().cloned().collect()
    }

    pub fn is_cache_dirty(&self) -> bool {
        self.cache_is_dirty
    }

    fn cached_task(&self, id: &str) -> Option<&Task> {
        // An empty cache never answers, whatever the id
        if self.cache.is_empty() {
            return None;
        }
        self.cache.get(id)
    }

    fn require_cached(&self, id: &str) -> Result<Task> {
        self.cached_task(id)
            .cloned()
            .ok_or_else(|| Error::TaskNotCached(id.to_string()))
    }

    fn refresh_cache(&mut self, tasks: &[Task]) {
        self.cache.clear();
        for task in tasks {
            self.cache.insert(task.id().to_string(), task.clone());
        }
        self.cache_is_dirty = false;
    }

    /// Replace the local store's contents with `tasks`.
    ///
    /// The fetched data is already cached, so local failures are logged
    /// rather than failing the read.
    async fn refresh_local_store(&self, tasks: &[Task]) {
        if let Err(e) = self.local.delete_all_tasks().await {
            warn!("Failed to clear local store during refresh: {}", e);
        }
        for task in tasks {
            if let Err(e) = self.local.save_task(task).await {
                warn!("Failed to save task {} to local store: {}", task.id(), e);
            }
        }
    }
}
