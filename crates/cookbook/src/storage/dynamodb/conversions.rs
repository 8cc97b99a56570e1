//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! recipes. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cookbook_core::recipe::{
    CookingStep, CuisineType, Ingredient, Pairing, PrepStep, Recipe, Variation,
};
use cookbook_core::storage::RepositoryError;

use super::keys;

pub const ENTITY_TYPE_RECIPE: &str = "RECIPE";

/// Owned sub-collections, stored as one JSON attribute.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecipeDetails {
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    prep_steps: Vec<PrepStep>,
    #[serde(default)]
    steps: Vec<CookingStep>,
    #[serde(default)]
    variations: Vec<Variation>,
    #[serde(default)]
    pairings: Vec<Pairing>,
}

/// Serializes the sub-collections, or `None` when all are empty.
fn details_json(recipe: &Recipe) -> Result<Option<String>, RepositoryError> {
    if !recipe.has_details() {
        return Ok(None);
    }
    let details = RecipeDetails {
        ingredients: recipe.ingredients.clone(),
        prep_steps: recipe.prep_steps.clone(),
        steps: recipe.steps.clone(),
        variations: recipe.variations.clone(),
        pairings: recipe.pairings.clone(),
    };
    serde_json::to_string(&details)
        .map(Some)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Convert a Recipe to DynamoDB item.
pub fn recipe_to_item(recipe: &Recipe) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
    let mut item = HashMap::new();

    // Keys
    item.insert("PK".to_string(), AttributeValue::S(keys::recipe_pk(recipe.id)));
    item.insert("SK".to_string(), AttributeValue::S(keys::recipe_sk(recipe.id)));

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_RECIPE.to_string()),
    );

    // Data
    item.insert("id".to_string(), AttributeValue::S(recipe.id.to_string()));
    item.insert("name".to_string(), AttributeValue::S(recipe.name.clone()));
    if let Some(desc) = &recipe.description {
        item.insert("description".to_string(), AttributeValue::S(desc.clone()));
    }
    item.insert(
        "cuisine".to_string(),
        AttributeValue::S(recipe.cuisine.as_str().to_string()),
    );
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(recipe.created_at.to_rfc3339()),
    );
    if let Some(details) = details_json(recipe)? {
        item.insert("details".to_string(), AttributeValue::S(details));
    }

    Ok(item)
}

/// Convert a DynamoDB item to Recipe.
pub fn item_to_recipe(item: &HashMap<String, AttributeValue>) -> Result<Recipe, RepositoryError> {
    let cuisine = get_string(item, "cuisine")?
        .parse::<CuisineType>()
        .map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    let details = match get_optional_string(item, "details") {
        Some(json) => serde_json::from_str::<RecipeDetails>(&json)
            .map_err(|e| RepositoryError::Serialization(format!("Invalid details: {}", e)))?,
        None => RecipeDetails::default(),
    };

    Ok(Recipe {
        id: get_uuid(item, "id")?,
        name: get_string(item, "name")?,
        description: get_optional_string(item, "description"),
        cuisine,
        created_at: get_datetime(item, "createdAt")?,
        ingredients: details.ingredients,
        prep_steps: details.prep_steps,
        steps: details.steps,
        variations: details.variations,
        pairings: details.pairings,
    })
}

/// Parameters of an `UpdateItem` call that rewrites a recipe's mutable fields.
///
/// `id` and `createdAt` are never part of the expression. Absent optional
/// fields are removed from the stored item.
#[derive(Debug)]
pub struct RecipeUpdate {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Builds the update expression for `recipe`.
pub fn recipe_update(recipe: &Recipe) -> Result<RecipeUpdate, RepositoryError> {
    let mut names = HashMap::new();
    let mut values = HashMap::new();
    let mut set = Vec::new();
    let mut remove = Vec::new();

    names.insert("#name".to_string(), "name".to_string());
    values.insert(":name".to_string(), AttributeValue::S(recipe.name.clone()));
    set.push("#name = :name");

    names.insert("#cuisine".to_string(), "cuisine".to_string());
    values.insert(
        ":cuisine".to_string(),
        AttributeValue::S(recipe.cuisine.as_str().to_string()),
    );
    set.push("#cuisine = :cuisine");

    names.insert("#description".to_string(), "description".to_string());
    match &recipe.description {
        Some(desc) => {
            values.insert(":description".to_string(), AttributeValue::S(desc.clone()));
            set.push("#description = :description");
        }
        None => remove.push("#description"),
    }

    names.insert("#details".to_string(), "details".to_string());
    match details_json(recipe)? {
        Some(details) => {
            values.insert(":details".to_string(), AttributeValue::S(details));
            set.push("#details = :details");
        }
        None => remove.push("#details"),
    }

    let mut expression = format!("SET {}", set.join(", "));
    if !remove.is_empty() {
        expression.push_str(&format!(" REMOVE {}", remove.join(", ")));
    }

    Ok(RecipeUpdate {
        expression,
        names,
        values,
    })
}

// ============================================================================
// Attribute helpers
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required UUID attribute.
fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use cookbook_core::recipe::IngredientKind;

    use super::*;

    fn sample_recipe() -> Recipe {
        let mut recipe = Recipe::new("Tamagoyaki", CuisineType::Japanese)
            .with_id(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
            .with_description("Rolled omelette");
        recipe.created_at = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        recipe
    }

    fn with_details(mut recipe: Recipe) -> Recipe {
        let egg = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap();
        recipe.ingredients.push(Ingredient {
            id: egg,
            name: "Egg".to_string(),
            description: None,
            kind: IngredientKind::Poultry,
        });
        recipe.prep_steps.push(PrepStep {
            ingredient_id: egg,
            action: "whisk".to_string(),
            index: 0,
        });
        recipe.steps.push(CookingStep {
            ingredient_id: egg,
            action: "fry in thin layers".to_string(),
            temperature: Some(160.0),
        });
        recipe
    }

    #[test]
    fn test_recipe_round_trip() {
        let recipe = sample_recipe();
        let item = recipe_to_item(&recipe).unwrap();
        let parsed = item_to_recipe(&item).unwrap();

        assert_eq!(parsed, recipe);
    }

    #[test]
    fn test_recipe_round_trip_with_details() {
        let recipe = with_details(sample_recipe());
        let item = recipe_to_item(&recipe).unwrap();
        let parsed = item_to_recipe(&item).unwrap();

        assert_eq!(parsed, recipe);
    }

    #[test]
    fn test_recipe_item_has_correct_keys() {
        let item = recipe_to_item(&sample_recipe()).unwrap();

        assert_eq!(
            item.get("PK").unwrap().as_s().unwrap(),
            "RECIPE#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(item.get("SK").unwrap().as_s().unwrap(), item.get("PK").unwrap().as_s().unwrap());
        assert_eq!(item.get("entityType").unwrap().as_s().unwrap(), "RECIPE");
        assert_eq!(item.get("cuisine").unwrap().as_s().unwrap(), "japanese");
        assert_eq!(
            item.get("createdAt").unwrap().as_s().unwrap(),
            "2024-01-15T10:30:00+00:00"
        );
        assert!(!item.contains_key("details"));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut recipe = sample_recipe();
        recipe.description = None;

        let item = recipe_to_item(&recipe).unwrap();

        assert!(!item.contains_key("description"));
        assert_eq!(item_to_recipe(&item).unwrap().description, None);
    }

    #[test]
    fn test_missing_field_is_invalid_data() {
        let mut item = recipe_to_item(&sample_recipe()).unwrap();
        item.remove("name");

        assert_eq!(
            item_to_recipe(&item),
            Err(RepositoryError::InvalidData(
                "Missing or invalid field: name".to_string()
            ))
        );
    }

    #[test]
    fn test_unrecognised_cuisine_is_invalid_data() {
        let mut item = recipe_to_item(&sample_recipe()).unwrap();
        item.insert("cuisine".to_string(), AttributeValue::S("lunar".to_string()));

        assert!(matches!(
            item_to_recipe(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_update_expression_never_touches_identity() {
        let update = recipe_update(&sample_recipe()).unwrap();

        assert_eq!(
            update.expression,
            "SET #name = :name, #cuisine = :cuisine, #description = :description REMOVE #details"
        );
        assert!(!update.names.values().any(|n| n == "id" || n == "createdAt"));
        assert_eq!(
            update.values.get(":name").unwrap().as_s().unwrap(),
            "Tamagoyaki"
        );
    }

    #[test]
    fn test_update_expression_removes_absent_description() {
        let mut recipe = with_details(sample_recipe());
        recipe.description = None;

        let update = recipe_update(&recipe).unwrap();

        assert_eq!(
            update.expression,
            "SET #name = :name, #cuisine = :cuisine, #details = :details REMOVE #description"
        );
        assert!(!update.values.contains_key(":description"));
    }
}
