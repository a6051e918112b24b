// Tox - a personal todo tracker persisted in SQLite

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use config::Config;
pub use error::{ErrorKind, Result, StoreError};
pub use store::Store;
pub use task::{Task, TaskStatus};

// Re-export rusqlite for callers that inspect the connection
pub use rusqlite;
