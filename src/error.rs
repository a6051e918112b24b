// Typed errors for store operations

use std::path::PathBuf;

/// Result alias used throughout the store
pub type Result<T> = std::result::Result<T, StoreError>;

/// Coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Rejected before anything touched the database
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No task carries the requested ID
    #[error("todo with id {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("could not access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
}

impl StoreError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) | Self::Io { .. } | Self::UnsupportedSchema { .. } => ErrorKind::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(StoreError::invalid_input("empty").kind(), ErrorKind::InvalidInput);
        assert_eq!(StoreError::NotFound(3).kind(), ErrorKind::NotFound);
        assert_eq!(
            StoreError::from(rusqlite::Error::QueryReturnedNoRows).kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            StoreError::UnsupportedSchema { found: 9, supported: 1 }.kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StoreError::NotFound(7).to_string(), "todo with id 7 not found");
        assert_eq!(
            StoreError::invalid_input("Task cannot be empty").to_string(),
            "invalid input: Task cannot be empty"
        );
    }
}
