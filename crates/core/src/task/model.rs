//! Task model definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do item.
///
/// Tasks are values: a state change such as completing a task produces a new
/// `Task` with the same id instead of mutating the existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    completed: bool,
}

impl Task {
    /// Create a new active task with a freshly generated id
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Create a new active task with a caller-supplied id
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            completed: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the completed flag
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }

    /// A task with neither title nor description
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }

    /// Text to show in a list row: the title, or the description when untitled
    pub fn title_for_list(&self) -> &str {
        if self.title.is_empty() {
            &self.description
        } else {
            &self.title
        }
    }

    /// Whether both values describe the same entity, regardless of state
    pub fn same_entity(&self, other: &Task) -> bool {
        self.id == other.id
    }

    /// Copy of this task marked completed
    pub fn as_completed(&self) -> Task {
        self.clone().with_completed(true)
    }

    /// Copy of this task marked active
    pub fn as_active(&self) -> Task {
        self.clone().with_completed(false)
    }
}
