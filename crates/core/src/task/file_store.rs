//! File-based local task storage
//!
//! Stores task rows as JSON in a file on disk.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

use super::data_source::TasksDataSource;
use super::model::Task;
use crate::{Error, Result};

/// Local task store: one row per task id, persisted as a JSON array
pub struct FileTasksDataSource {
    /// Path to the JSON file
    path: PathBuf,
    /// Rows keyed by task id, in insertion order
    rows: RwLock<IndexMap<String, Task>>,
}

impl FileTasksDataSource {
    /// Open the store at `path`
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let rows: IndexMap<String, Task> = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let tasks: Vec<Task> = serde_json::from_str(&content)?;
            tasks
                .into_iter()
                .map(|t| (t.id().to_string(), t))
                .collect()
        } else {
            IndexMap::new()
        };

        debug!("Opened local task store at {} ({} rows)", path.display(), rows.len());

        Ok(Self {
            path,
            rows: RwLock::new(rows),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the rows to disk
    async fn persist(&self, rows: &IndexMap<String, Task>) -> Result<()> {
        let tasks: Vec<&Task> = rows.values().collect();
        let content = serde_json::to_string_pretty(&tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        debug!("Persisted {} rows to {}", tasks.len(), self.path.display());
        Ok(())
    }

    /// Apply `change` to a copy of the rows and commit the copy once it is on disk
    async fn modify<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut IndexMap<String, Task>) -> bool + Send,
    {
        let mut rows = self.rows.write().await;
        let mut updated = rows.clone();
        if change(&mut updated) {
            self.persist(&updated).await?;
            *rows = updated;
        }
        Ok(())
    }

    async fn set_completed(&self, id: &str, completed: bool) -> Result<()> {
        self.modify(|rows| match rows.get_mut(id) {
            Some(row) => {
                *row = row.clone().with_completed(completed);
                true
            }
            None => false,
        })
        .await
    }
}

#[async_trait]
impl TasksDataSource for FileTasksDataSource {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let rows = self.rows.read().await;
        // A new or empty table has nothing to offer
        if rows.is_empty() {
            return Err(Error::NotAvailable);
        }
        Ok(rows.values().cloned().collect())
    }

    async fn get_task(&self, id: &str) -> Result<Task> {
        let rows = self.rows.read().await;
        rows.get(id).cloned().ok_or(Error::NotAvailable)
    }

    async fn save_task(&self, task: &Task) -> Result<()> {
        let task = task.clone();
        self.modify(|rows| {
            rows.insert(task.id().to_string(), task);
            true
        })
        .await
    }

    async fn complete_task(&self, task: &Task) -> Result<()> {
        self.set_completed(task.id(), true).await
    }

    async fn complete_task_by_id(&self, _id: &str) -> Result<()> {
        // The repository resolves the entity and calls complete_task instead
        Ok(())
    }

    async fn activate_task(&self, task: &Task) -> Result<()> {
        self.set_completed(task.id(), false).await
    }

    async fn activate_task_by_id(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn clear_completed_tasks(&self) -> Result<()> {
        self.modify(|rows| {
            let before = rows.len();
            rows.retain(|_, task| task.is_active());
            rows.len() != before
        })
        .await
    }

    async fn refresh_tasks(&self) -> Result<()> {
        // The repository owns refresh state
        Ok(())
    }

    async fn delete_all_tasks(&self) -> Result<()> {
        self.modify(|rows| {
            rows.clear();
            true
        })
        .await
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        self.modify(|rows| rows.shift_remove(id).is_some()).await
    }
}
