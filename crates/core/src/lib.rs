//! Core library for the cookbook service.
//!
//! Holds the recipe domain types, the request context, the repository
//! contract, and the [`service::RecipeService`] that orchestrates them.
//! Storage backends and the HTTP surface live in the `cookbook` binary crate.

pub mod context;
pub mod recipe;
pub mod service;
pub mod storage;
