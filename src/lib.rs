// TaskList - In-memory task list with filtering, statistics and overdue checks

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod shared;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use error::StoreError;
pub use filter::TaskFilter;
pub use models::{Analysis, Priority, SeedTask, Statistics, Task};
pub use shared::SharedTaskStore;
pub use store::{StoreConfig, TaskStore};
