//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The queried tier has no data; callers fall through to the next tier.
    #[error("Data not available")]
    NotAvailable,

    #[error("Task not cached: {0}")]
    TaskNotCached(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether this is the soft "no data" signal rather than a hard failure
    pub fn is_not_available(&self) -> bool {
        matches!(self, Self::NotAvailable)
    }
}
