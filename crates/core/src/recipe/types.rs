use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::CuisineParseError;

/// Cuisine a recipe belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CuisineType {
    /// Placeholder for a missing or unrecognised cuisine. Never valid for new recipes.
    #[default]
    Unknown,
    Japanese,
    French,
    Spanish,
    Indian,
    Chinese,
    Western,
    African,
}

impl CuisineType {
    /// Every cuisine that can be assigned to a new recipe.
    pub const KNOWN: [CuisineType; 7] = [
        CuisineType::Japanese,
        CuisineType::French,
        CuisineType::Spanish,
        CuisineType::Indian,
        CuisineType::Chinese,
        CuisineType::Western,
        CuisineType::African,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CuisineType::Unknown => "unknown",
            CuisineType::Japanese => "japanese",
            CuisineType::French => "french",
            CuisineType::Spanish => "spanish",
            CuisineType::Indian => "indian",
            CuisineType::Chinese => "chinese",
            CuisineType::Western => "western",
            CuisineType::African => "african",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CuisineType::Unknown)
    }
}

impl fmt::Display for CuisineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CuisineType {
    type Err = CuisineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" => Ok(CuisineType::Unknown),
            "japanese" => Ok(CuisineType::Japanese),
            "french" => Ok(CuisineType::French),
            "spanish" => Ok(CuisineType::Spanish),
            "indian" => Ok(CuisineType::Indian),
            "chinese" => Ok(CuisineType::Chinese),
            "western" => Ok(CuisineType::Western),
            "african" => Ok(CuisineType::African),
            _ => Err(CuisineParseError(s.to_string())),
        }
    }
}

/// Broad category of an ingredient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    #[default]
    Unknown,
    Vegetable,
    Fruit,
    Poultry,
    Fish,
    Condiment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: IngredientKind,
}

/// A preparation action applied to an ingredient before cooking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepStep {
    pub ingredient_id: Uuid,
    pub action: String,
    pub index: u32,
}

/// A cooking action, optionally at a temperature in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingStep {
    pub ingredient_id: Uuid,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub item_id: Uuid,
    pub variation: String,
}

/// Two ingredients that go well together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub base: Uuid,
    pub with: Uuid,
    pub description: String,
}

/// A recipe and the sub-collections it owns.
///
/// `id` and `created_at` are assigned once at creation and never change
/// after the recipe has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cuisine: CuisineType,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prep_steps: Vec<PrepStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<CookingStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pairings: Vec<Pairing>,
}

impl Recipe {
    /// Creates a recipe with a fresh id, stamped with the current UTC time.
    pub fn new(name: impl Into<String>, cuisine: CuisineType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            cuisine,
            created_at: Utc::now(),
            ingredients: Vec::new(),
            prep_steps: Vec::new(),
            steps: Vec::new(),
            variations: Vec::new(),
            pairings: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a specific ID for this recipe (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns true if any of the owned sub-collections is populated.
    pub fn has_details(&self) -> bool {
        !(self.ingredients.is_empty()
            && self.prep_steps.is_empty()
            && self.steps.is_empty()
            && self.variations.is_empty()
            && self.pairings.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuisine_parse_is_case_insensitive() {
        assert_eq!("Japanese".parse::<CuisineType>(), Ok(CuisineType::Japanese));
        assert_eq!("SPANISH".parse::<CuisineType>(), Ok(CuisineType::Spanish));
        assert_eq!(" indian ".parse::<CuisineType>(), Ok(CuisineType::Indian));
    }

    #[test]
    fn test_cuisine_parse_rejects_unknown_names() {
        assert_eq!(
            "martian".parse::<CuisineType>(),
            Err(CuisineParseError("martian".to_string()))
        );
    }

    #[test]
    fn test_cuisine_display_matches_parse() {
        for cuisine in CuisineType::KNOWN {
            assert_eq!(cuisine.to_string().parse::<CuisineType>(), Ok(cuisine));
            assert!(cuisine.is_known());
        }
        assert!(!CuisineType::Unknown.is_known());
    }

    #[test]
    fn test_cuisine_serializes_lowercase() {
        let json = serde_json::to_string(&CuisineType::Western).unwrap();
        assert_eq!(json, "\"western\"");
    }

    #[test]
    fn test_new_recipe_has_fresh_identity() {
        let before = Utc::now();
        let a = Recipe::new("Paella", CuisineType::Spanish);
        let b = Recipe::new("Paella", CuisineType::Spanish);

        assert_ne!(a.id, b.id);
        assert!(a.created_at >= before);
        assert!(a.description.is_none());
        assert!(!a.has_details());
    }

    #[test]
    fn test_has_details() {
        let mut recipe = Recipe::new("Tamagoyaki", CuisineType::Japanese);
        recipe.variations.push(Variation {
            item_id: Uuid::new_v4(),
            variation: "dashimaki".to_string(),
        });
        assert!(recipe.has_details());
    }
}
