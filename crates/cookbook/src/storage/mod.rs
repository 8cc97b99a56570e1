//! Storage backend implementations.
//!
//! Concrete implementations of [`RecipeRepository`] from
//! `cookbook_core::storage`. The backend is chosen once at startup with
//! [`StorageBackend`] and shared as an `Arc<dyn RecipeRepository>`.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always compiled in.

use std::sync::Arc;

use clap::ValueEnum;

use cookbook_core::storage::RecipeRepository;

use crate::config::Config;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;

/// Which repository backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process-local map, lost on restart.
    Memory,
    /// DynamoDB table named by `DYNAMODB_TABLE_NAME`.
    #[value(name = "dynamodb")]
    DynamoDb,
}

impl StorageBackend {
    /// Builds the selected repository.
    pub async fn build(self, config: &Config) -> anyhow::Result<Arc<dyn RecipeRepository>> {
        match self {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage");
                Ok(Arc::new(InMemoryRepository::new()))
            }
            StorageBackend::DynamoDb => build_dynamodb(config).await,
        }
    }
}

#[cfg(feature = "dynamodb")]
async fn build_dynamodb(config: &Config) -> anyhow::Result<Arc<dyn RecipeRepository>> {
    let repo = DynamoDbRepository::from_config(config).await;
    tracing::info!(
        table = %repo.table_name(),
        region = %config.aws_region,
        endpoint = ?config.aws_endpoint_url,
        "Using DynamoDB storage"
    );
    Ok(Arc::new(repo))
}

#[cfg(not(feature = "dynamodb"))]
async fn build_dynamodb(_config: &Config) -> anyhow::Result<Arc<dyn RecipeRepository>> {
    anyhow::bail!(
        "DynamoDB storage requested but cookbook was built without the 'dynamodb' feature"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(
            StorageBackend::from_str("memory", true),
            Ok(StorageBackend::Memory)
        );
        assert_eq!(
            StorageBackend::from_str("dynamodb", true),
            Ok(StorageBackend::DynamoDb)
        );
        assert!(StorageBackend::from_str("mongo", true).is_err());
    }
}
