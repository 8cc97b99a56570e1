//! In-memory storage backend.
//!
//! Stores recipes in a `HashMap` behind `Arc<RwLock<_>>`. Data is not
//! persisted and is lost when the repository is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use cookbook::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
