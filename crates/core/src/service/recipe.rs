use std::sync::Arc;

use crate::context::RequestContext;
use crate::recipe::{
    parse_recipe_id, validate_name, CuisineType, Recipe, RecipeError, UpdateRecipeRequest,
};
use crate::storage::RecipeRepository;

/// Recipe use cases, written against the repository contract only.
///
/// Holds exactly one repository, chosen when the service is built.
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    /// Validates and stores a new recipe.
    ///
    /// `cuisine` is stored as given; rejecting `Unknown` is the caller's job.
    pub async fn create_recipe(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: Option<String>,
        cuisine: CuisineType,
    ) -> Result<Recipe, RecipeError> {
        validate_name(name)?;

        let mut recipe = Recipe::new(name, cuisine);
        recipe.description = description;

        self.recipes.add_recipe(ctx, &recipe).await?;

        tracing::info!(
            request_id = %ctx.request_id(),
            recipe_id = %recipe.id,
            "Recipe added"
        );

        Ok(recipe)
    }

    /// Fetches a recipe by its string identifier.
    pub async fn get_recipe(&self, ctx: &RequestContext, id: &str) -> Result<Recipe, RecipeError> {
        tracing::debug!(request_id = %ctx.request_id(), recipe_id = %id, "Retrieving recipe");

        let id = parse_recipe_id(id)?;
        Ok(self.recipes.get_recipe(ctx, id).await?)
    }

    /// Applies `changes` to an existing recipe.
    pub async fn update_recipe(
        &self,
        ctx: &RequestContext,
        id: &str,
        changes: UpdateRecipeRequest,
    ) -> Result<Recipe, RecipeError> {
        let id = parse_recipe_id(id)?;
        if let Some(name) = &changes.name {
            validate_name(name)?;
        }

        let mut recipe = self.recipes.get_recipe(ctx, id).await?;
        changes.apply_to(&mut recipe);

        let updated = self.recipes.update_recipe(ctx, &recipe).await?;

        tracing::info!(
            request_id = %ctx.request_id(),
            recipe_id = %updated.id,
            "Recipe updated"
        );

        Ok(updated)
    }

    /// Deletes a recipe by its string identifier.
    pub async fn delete_recipe(&self, ctx: &RequestContext, id: &str) -> Result<(), RecipeError> {
        let id = parse_recipe_id(id)?;
        self.recipes.delete_recipe(ctx, id).await?;

        tracing::info!(request_id = %ctx.request_id(), recipe_id = %id, "Recipe deleted");

        Ok(())
    }
}
