use thiserror::Error;

use crate::context::ContextError;

/// Errors that can occur during repository operations.
///
/// `ConnectionFailed`, `QueryFailed`, `Serialization` and `InvalidData` are
/// persistence faults: unexpected failures of the underlying store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Operation deadline exceeded")]
    DeadlineExceeded,
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns true if the caller's context ended before the operation completed.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            RepositoryError::Cancelled | RepositoryError::DeadlineExceeded
        )
    }

    /// Returns true for unexpected failures of the underlying store.
    pub fn is_persistence_fault(&self) -> bool {
        matches!(
            self,
            RepositoryError::ConnectionFailed(_)
                | RepositoryError::QueryFailed(_)
                | RepositoryError::Serialization(_)
                | RepositoryError::InvalidData(_)
        )
    }
}

impl From<ContextError> for RepositoryError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => RepositoryError::Cancelled,
            ContextError::DeadlineExceeded => RepositoryError::DeadlineExceeded,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Recipe",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Recipe not found: abc-123");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Recipe",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Recipe already exists: abc-123");
    }

    #[test]
    fn test_context_errors_convert() {
        assert_eq!(
            RepositoryError::from(ContextError::Cancelled),
            RepositoryError::Cancelled
        );
        assert_eq!(
            RepositoryError::from(ContextError::DeadlineExceeded),
            RepositoryError::DeadlineExceeded
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(RepositoryError::DeadlineExceeded.is_timeout());
        assert!(!RepositoryError::DeadlineExceeded.is_persistence_fault());
        assert!(RepositoryError::ConnectionFailed("down".to_string()).is_persistence_fault());
        assert!(RepositoryError::Serialization("bad".to_string()).is_persistence_fault());
        assert!(!RepositoryError::NotFound {
            entity_type: "Recipe",
            id: "x".to_string()
        }
        .is_persistence_fault());
    }
}
