use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cookbook_core::recipe::{
    CookingStep, CuisineParseError, CuisineType, Ingredient, Pairing, PrepStep, Recipe,
    UpdateRecipeRequest, Variation,
};

/// Parses a cuisine supplied by a client.
///
/// `unknown` names no cuisine and is rejected like any unrecognised value.
pub fn parse_cuisine(value: &str) -> Result<CuisineType, CuisineParseError> {
    match value.parse::<CuisineType>()? {
        CuisineType::Unknown => Err(CuisineParseError(value.to_string())),
        cuisine => Ok(cuisine),
    }
}

/// Response body for `POST /recipe`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&Recipe> for CreateRecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
        }
    }
}

/// Descriptive fields of a recipe.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: CuisineType,
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /recipe/{id}` and `PUT /recipe/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub item: RecipeItem,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prep: Vec<PrepStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<CookingStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pairings: Vec<Pairing>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            item: RecipeItem {
                id: recipe.id,
                name: recipe.name,
                description: recipe.description,
                cuisine: recipe.cuisine,
                created_at: recipe.created_at,
            },
            ingredients: recipe.ingredients,
            variations: recipe.variations,
            prep: recipe.prep_steps,
            steps: recipe.steps,
            pairings: recipe.pairings,
        }
    }
}

/// Request payload for `PUT /recipe/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateRecipe {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
}

impl UpdateRecipe {
    /// Validates the cuisine and converts into the service's change set.
    pub fn into_request(self) -> Result<UpdateRecipeRequest, CuisineParseError> {
        let cuisine = self.cuisine.as_deref().map(parse_cuisine).transpose()?;
        Ok(UpdateRecipeRequest {
            name: self.name,
            description: self.description,
            cuisine,
        })
    }
}
