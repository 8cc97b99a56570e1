//! DynamoDB repository implementation.
//!
//! Implements `RecipeRepository` from `cookbook_core::storage` using DynamoDB.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use cookbook_core::context::RequestContext;
use cookbook_core::recipe::Recipe;
use cookbook_core::storage::{RecipeRepository, RepositoryError, Result};

use super::conversions::{item_to_recipe, recipe_to_item, recipe_update};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_update_item_error,
};
use super::keys;
use crate::config::Config;

/// DynamoDB-based repository implementation.
///
/// Every SDK call is raced against the request context. When the context
/// ends first the call is abandoned; a write that already reached DynamoDB
/// may still be applied.
///
/// After [`RecipeRepository::shutdown`] every call fails with
/// `ConnectionFailed` without reaching DynamoDB.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    closed: Arc<AtomicBool>,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a new repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain with the configured region,
    /// and the endpoint override when one is set (e.g. DynamoDB Local).
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()));
        if let Some(endpoint) = &config.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        Self::new(Client::new(&sdk_config), config.dynamodb_table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Point lookup, strongly consistent so a read right after a write observes it.
    fn get_item_request(&self, id: Uuid) -> GetItemFluentBuilder {
        self.client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::recipe_pk(id)))
            .key("SK", AttributeValue::S(keys::recipe_sk(id)))
            .consistent_read(true)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(RepositoryError::ConnectionFailed(format!(
                "DynamoDB repository for table {} is shut down",
                self.table_name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for DynamoDbRepository {
    async fn get_recipe(&self, ctx: &RequestContext, id: Uuid) -> Result<Recipe> {
        ctx.check()?;
        self.ensure_open()?;

        let request = self.get_item_request(id).send();
        let result = ctx.run(request).await?.map_err(map_get_item_error)?;

        match result.item {
            Some(item) => item_to_recipe(&item),
            None => Err(RepositoryError::NotFound {
                entity_type: "Recipe",
                id: id.to_string(),
            }),
        }
    }

    async fn add_recipe(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<()> {
        ctx.check()?;
        self.ensure_open()?;
        let item = recipe_to_item(recipe)?;

        let request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send();
        ctx.run(request)
            .await?
            .map_err(|e| map_put_item_error(e, recipe.id.to_string()))?;

        Ok(())
    }

    async fn update_recipe(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<Recipe> {
        ctx.check()?;
        self.ensure_open()?;
        let update = recipe_update(recipe)?;

        let request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::recipe_pk(recipe.id)))
            .key("SK", AttributeValue::S(keys::recipe_sk(recipe.id)))
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .condition_expression("attribute_exists(PK)")
            .return_values(ReturnValue::AllNew)
            .send();
        let result = ctx
            .run(request)
            .await?
            .map_err(|e| map_update_item_error(e, recipe.id.to_string()))?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::InvalidData("UpdateItem returned no attributes".to_string())
        })?;
        item_to_recipe(&attributes)
    }

    async fn delete_recipe(&self, ctx: &RequestContext, id: Uuid) -> Result<()> {
        ctx.check()?;
        self.ensure_open()?;

        let request = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::recipe_pk(id)))
            .key("SK", AttributeValue::S(keys::recipe_sk(id)))
            .condition_expression("attribute_exists(PK)")
            .send();
        ctx.run(request)
            .await?
            .map_err(|e| map_delete_item_error(e, id.to_string()))?;

        Ok(())
    }

    async fn shutdown(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::info!(table = %self.table_name, "DynamoDB storage shut down");
        }
    }
}
