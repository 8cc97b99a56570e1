use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors produced by recipe operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecipeError {
    #[error("Recipe name cannot be empty")]
    InvalidName,
    #[error("Invalid recipe id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RecipeError {
    /// Returns true if the request's context ended before the operation completed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RecipeError::Repository(err) if err.is_timeout())
    }
}

/// Error returned when a string does not name a known cuisine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown cuisine: {0}")]
pub struct CuisineParseError(pub String);
