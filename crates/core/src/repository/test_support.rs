//! Recording in-memory data source for repository tests

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::task::{Task, TasksDataSource};
use crate::{Error, Result};

/// One adapter invocation, keyed by task id where the operation has one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(String),
    Save(String),
    Complete(String),
    CompleteById(String),
    Activate(String),
    ActivateById(String),
    ClearCompleted,
    Refresh,
    DeleteAll,
    Delete(String),
}

#[derive(Default)]
pub struct FakeTasksDataSource {
    tasks: Mutex<IndexMap<String, Task>>,
    calls: Mutex<Vec<Call>>,
    unavailable: AtomicBool,
    failing_writes: AtomicBool,
}

impl FakeTasksDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a task without recording a call
    pub fn insert(&self, task: Task) {
        self.tasks
            .lock()
            .unwrap()
            .insert(task.id().to_string(), task);
    }

    pub fn replace_all(&self, tasks: Vec<Task>) {
        let mut stored = self.tasks.lock().unwrap();
        stored.clear();
        for task in tasks {
            stored.insert(task.id().to_string(), task);
        }
    }

    pub fn stored(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().values().cloned().collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Number of list and get calls seen so far
    pub fn reads(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::List | Call::Get(_)))
            .count()
    }

    /// Answer every read with `NotAvailable`
    pub fn make_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    /// Record writes but fail them with an I/O error without applying them
    pub fn fail_writes(&self) {
        self.failing_writes.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn read(&self, call: Call) -> Result<()> {
        self.record(call);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::NotAvailable);
        }
        Ok(())
    }

    fn write<F>(&self, call: Call, change: F) -> Result<()>
    where
        F: FnOnce(&mut IndexMap<String, Task>),
    {
        self.record(call);
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "write rejected",
            )));
        }
        change(&mut *self.tasks.lock().unwrap());
        Ok(())
    }

    fn set_completed(tasks: &mut IndexMap<String, Task>, id: &str, completed: bool) {
        if let Some(task) = tasks.get_mut(id) {
            *task = task.clone().with_completed(completed);
        }
    }
}

#[async_trait]
impl TasksDataSource for FakeTasksDataSource {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.read(Call::List)?;
        Ok(self.stored())
    }

    async fn get_task(&self, id: &str) -> Result<Task> {
        self.read(Call::Get(id.to_string()))?;
        self.tasks
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(Error::NotAvailable)
    }

    async fn save_task(&self, task: &Task) -> Result<()> {
        self.write(Call::Save(task.id().to_string()), |tasks| {
            tasks.insert(task.id().to_string(), task.clone());
        })
    }

    async fn complete_task(&self, task: &Task) -> Result<()> {
        self.write(Call::Complete(task.id().to_string()), |tasks| {
            Self::set_completed(tasks, task.id(), true)
        })
    }

    async fn complete_task_by_id(&self, id: &str) -> Result<()> {
        self.write(Call::CompleteById(id.to_string()), |_| {})
    }

    async fn activate_task(&self, task: &Task) -> Result<()> {
        self.write(Call::Activate(task.id().to_string()), |tasks| {
            Self::set_completed(tasks, task.id(), false)
        })
    }

    async fn activate_task_by_id(&self, id: &str) -> Result<()> {
        self.write(Call::ActivateById(id.to_string()), |_| {})
    }

    async fn clear_completed_tasks(&self) -> Result<()> {
        self.write(Call::ClearCompleted, |tasks| {
            tasks.retain(|_, task| task.is_active())
        })
    }

    async fn refresh_tasks(&self) -> Result<()> {
        self.write(Call::Refresh, |_| {})
    }

    async fn delete_all_tasks(&self) -> Result<()> {
        self.write(Call::DeleteAll, |tasks| tasks.clear())
    }

    async fn delete_task(&self, id: &str) -> Result<()> {
        self.write(Call::Delete(id.to_string()), |tasks| {
            tasks.shift_remove(id);
        })
    }
}
