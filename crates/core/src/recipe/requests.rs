//! Request payloads for recipe operations.
//!
//! Plain data shared by the service and the transport layer.

use serde::{Deserialize, Serialize};

use super::types::{CuisineType, Recipe};

/// Payload for creating a recipe.
///
/// `cuisine` is kept as the raw string so the caller-facing layer can tell a
/// malformed body apart from an unrecognised cuisine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub cuisine: String,
}

/// Partial update of a recipe's descriptive fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<CuisineType>,
}

impl UpdateRecipeRequest {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cuisine(mut self, cuisine: CuisineType) -> Self {
        self.cuisine = Some(cuisine);
        self
    }

    /// Applies the changes to a recipe. Identity and creation time are untouched.
    pub fn apply_to(self, recipe: &mut Recipe) {
        if let Some(name) = self.name {
            recipe.name = name;
        }
        if let Some(description) = self.description {
            recipe.description = Some(description);
        }
        if let Some(cuisine) = self.cuisine {
            recipe.cuisine = cuisine;
        }
    }
}
