//! Application state shared by all request handlers.

use std::sync::Arc;

use cookbook_core::service::RecipeService;
use cookbook_core::storage::RecipeRepository;

use crate::stats::Stats;

/// Shared application state.
///
/// Cloned for each request; every field is a cheap handle to a collaborator
/// built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Recipe use cases, bound to the repository selected at startup.
    pub recipes: RecipeService,
    /// Per-endpoint outcome counters.
    pub stats: Arc<Stats>,
}

impl AppState {
    pub fn new(recipes: Arc<dyn RecipeRepository>, stats: Arc<Stats>) -> Self {
        Self {
            recipes: RecipeService::new(recipes),
            stats,
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// In-memory state for tests.
    fn default() -> Self {
        Self::new(
            Arc::new(crate::storage::InMemoryRepository::new()),
            Arc::new(Stats::new("cookbook", "test", "127.0.0.1")),
        )
    }
}
