//! DynamoDB key generation functions.
//!
//! Pure functions for generating partition and sort keys.

use uuid::Uuid;

pub const RECIPE_PREFIX: &str = "RECIPE#";

/// Generate primary key for a Recipe.
///
/// Pattern: `RECIPE#<recipe_id>`
pub fn recipe_pk(recipe_id: Uuid) -> String {
    format!("{RECIPE_PREFIX}{recipe_id}")
}

/// Generate sort key for a Recipe.
///
/// Pattern: `RECIPE#<recipe_id>` (same as PK for single-item access)
pub fn recipe_sk(recipe_id: Uuid) -> String {
    format!("{RECIPE_PREFIX}{recipe_id}")
}
