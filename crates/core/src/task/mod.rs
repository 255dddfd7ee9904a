//! Task module
//!
//! This module contains the task entity, the data source contract and the
//! local and remote data source implementations.

mod data_source;
mod file_store;
mod model;
mod remote;

pub use data_source::TasksDataSource;
#[cfg(test)]
pub use data_source::MockTasksDataSource;
pub use file_store::FileTasksDataSource;
pub use model::*;
pub use remote::SimulatedRemoteDataSource;
