//! Core library for todo-sync
//!
//! This crate contains the local-first synchronization logic, including:
//! - The task entity
//! - The data source contract with local and remote adapters
//! - The repository that keeps an in-memory cache consistent with both stores

pub mod config;
pub mod error;
pub mod repository;
pub mod task;

pub use config::SyncConfig;
pub use error::Error;
pub use repository::{SharedTasksRepository, TasksRepository, TasksRepositoryProvider};
pub type Result<T> = std::result::Result<T, Error>;
