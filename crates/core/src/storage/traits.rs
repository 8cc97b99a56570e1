use async_trait::async_trait;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::recipe::Recipe;

use super::Result;

/// Persistence contract for recipes.
///
/// Every operation is bounded by `ctx`: an operation whose context has been
/// cancelled or has passed its deadline fails with
/// [`RepositoryError::Cancelled`](super::RepositoryError::Cancelled) or
/// [`RepositoryError::DeadlineExceeded`](super::RepositoryError::DeadlineExceeded)
/// and leaves the store unchanged. Implementations must be safe to share
/// between concurrent requests.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Gets a recipe by its ID. Fails with `NotFound` if absent.
    async fn get_recipe(&self, ctx: &RequestContext, id: Uuid) -> Result<Recipe>;

    /// Adds a new recipe. Fails with `AlreadyExists` if the ID is taken.
    async fn add_recipe(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<()>;

    /// Replaces an existing recipe and returns the stored value.
    ///
    /// Fails with `NotFound` if absent. The stored `created_at` is kept.
    async fn update_recipe(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<Recipe>;

    /// Deletes a recipe by its ID. Fails with `NotFound` if absent.
    async fn delete_recipe(&self, ctx: &RequestContext, id: Uuid) -> Result<()>;

    /// Releases the store. Called once, after the server has stopped serving.
    async fn shutdown(&self) {}
}
