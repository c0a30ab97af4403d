// tasklist - Persistent task-list store with search and pagination

pub mod config;
pub mod filter;
pub mod models;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use models::Task;
pub use storage::{FileStorage, MemoryStorage, Storage, TASKS_KEY};
pub use store::{QueryResult, TaskStore, ValidationError};
