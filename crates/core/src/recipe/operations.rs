use uuid::Uuid;

use super::error::RecipeError;

/// Rejects blank recipe names.
pub fn validate_name(name: &str) -> Result<(), RecipeError> {
    if name.trim().is_empty() {
        return Err(RecipeError::InvalidName);
    }
    Ok(())
}

/// Parses a recipe identifier supplied by a caller.
pub fn parse_recipe_id(id: &str) -> Result<Uuid, RecipeError> {
    Uuid::parse_str(id.trim()).map_err(|_| RecipeError::InvalidId(id.to_string()))
}
