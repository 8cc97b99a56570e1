//! DynamoDB storage backend implementation.
//!
//! Recipes live in a single table as flat items keyed by `PK`/`SK`. Keys and
//! attribute conversions are pure functions, tested without a live table.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbRepository;
