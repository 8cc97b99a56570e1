//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use cookbook_core::context::RequestContext;
use cookbook_core::recipe::Recipe;
use cookbook_core::storage::{RecipeRepository, RepositoryError, Result};

const ENTITY_TYPE: &str = "Recipe";

/// In-memory storage backend.
///
/// Every operation checks the context before waiting for the lock, bounds the
/// wait by the context, and checks again once the guard is held. A request
/// whose context has ended never touches the map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    recipes: Arc<RwLock<HashMap<Uuid, Recipe>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: Uuid) -> RepositoryError {
        RepositoryError::NotFound {
            entity_type: ENTITY_TYPE,
            id: id.to_string(),
        }
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRepository {
    async fn get_recipe(&self, ctx: &RequestContext, id: Uuid) -> Result<Recipe> {
        ctx.check()?;
        let recipes = ctx.run(self.recipes.read()).await?;
        ctx.check()?;

        recipes.get(&id).cloned().ok_or_else(|| Self::not_found(id))
    }

    async fn add_recipe(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<()> {
        ctx.check()?;
        let mut recipes = ctx.run(self.recipes.write()).await?;
        ctx.check()?;

        if recipes.contains_key(&recipe.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: ENTITY_TYPE,
                id: recipe.id.to_string(),
            });
        }
        recipes.insert(recipe.id, recipe.clone());
        Ok(())
    }

    async fn update_recipe(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<Recipe> {
        ctx.check()?;
        let mut recipes = ctx.run(self.recipes.write()).await?;
        ctx.check()?;

        let stored = recipes
            .get_mut(&recipe.id)
            .ok_or_else(|| Self::not_found(recipe.id))?;
        let created_at = stored.created_at;
        *stored = recipe.clone();
        stored.created_at = created_at;
        Ok(stored.clone())
    }

    async fn delete_recipe(&self, ctx: &RequestContext, id: Uuid) -> Result<()> {
        ctx.check()?;
        let mut recipes = ctx.run(self.recipes.write()).await?;
        ctx.check()?;

        if recipes.remove(&id).is_none() {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn shutdown(&self) {
        let mut recipes = self.recipes.write().await;
        tracing::info!(discarded = recipes.len(), "In-memory storage shut down");
        recipes.clear();
    }
}
