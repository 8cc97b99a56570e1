//! Pure functions for mapping recipe and repository errors to HTTP status codes.

use super::RepositoryError;
use crate::recipe::RecipeError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `Cancelled`, `DeadlineExceeded` -> 504 (Gateway Timeout)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed`, `Serialization`, `InvalidData` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use cookbook_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Recipe",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::Cancelled | RepositoryError::DeadlineExceeded => 504,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 500,
    }
}

/// Maps a [`RecipeError`] to an HTTP status code.
///
/// Validation failures are client errors (400); repository errors use
/// [`repository_error_to_status_code`].
pub fn recipe_error_to_status_code(error: &RecipeError) -> u16 {
    match error {
        RecipeError::InvalidName | RecipeError::InvalidId(_) => 400,
        RecipeError::Repository(err) => repository_error_to_status_code(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::NotFound {
            entity_type: "Recipe",
            id: "recipe-123".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_already_exists_maps_to_409() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Recipe",
            id: "recipe-456".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 409);
    }

    #[test]
    fn test_timeouts_map_to_504() {
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::DeadlineExceeded),
            504
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::Cancelled),
            504
        );
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = RepositoryError::ConnectionFailed("endpoint unreachable".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_persistence_faults_map_to_500() {
        for error in [
            RepositoryError::QueryFailed("throttled".to_string()),
            RepositoryError::Serialization("bad json".to_string()),
            RepositoryError::InvalidData("missing name".to_string()),
        ] {
            assert_eq!(repository_error_to_status_code(&error), 500);
        }
    }

    #[test]
    fn test_validation_errors_map_to_400() {
        assert_eq!(recipe_error_to_status_code(&RecipeError::InvalidName), 400);
        assert_eq!(
            recipe_error_to_status_code(&RecipeError::InvalidId("abc".to_string())),
            400
        );
    }

    #[test]
    fn test_recipe_error_defers_to_repository_mapping() {
        let error = RecipeError::Repository(RepositoryError::NotFound {
            entity_type: "Recipe",
            id: "x".to_string(),
        });
        assert_eq!(recipe_error_to_status_code(&error), 404);
    }
}
