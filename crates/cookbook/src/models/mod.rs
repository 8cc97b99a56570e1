mod recipe;

pub use recipe::{parse_cuisine, CreateRecipeResponse, RecipeResponse, UpdateRecipe};
