mod error;
mod operations;
mod requests;
mod types;

pub use error::{CuisineParseError, RecipeError};
pub use operations::{parse_recipe_id, validate_name};
pub use requests::{CreateRecipeRequest, UpdateRecipeRequest};
pub use types::{
    CookingStep, CuisineType, Ingredient, IngredientKind, Pairing, PrepStep, Recipe, Variation,
};
