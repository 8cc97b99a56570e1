//! Orchestration layer between the transport and the repository.

mod recipe;

pub use recipe::RecipeService;
