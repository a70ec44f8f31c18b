//! Shared data types for detection and recipe generation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of running ingredient detection on an uploaded photo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetectionResult {
    /// Display names of the detected ingredients, deduplicated, first-seen order.
    pub ingredients: Vec<String>,
    /// Confidence score for each ingredient, parallel to `ingredients`.
    pub confidence: Vec<f32>,
    /// Wall-clock processing time in seconds.
    pub processing_time: f64,
}

/// A request to generate a recipe from a set of ingredients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Ingredients available to cook with.
    pub ingredients: Vec<String>,
    /// What the user feels like eating (e.g. "pasta", "salad").
    pub meal_craving: String,
    /// Dietary restrictions to honor (e.g. "vegetarian").
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Preferred cuisine, or "Any" for no preference.
    #[serde(default = "default_cuisine")]
    pub preferred_cuisine: String,
}

fn default_cuisine() -> String {
    "Any".to_string()
}

/// One ingredient line in a generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One numbered step in a generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Instruction {
    pub step: u32,
    pub text: String,
    /// Estimated time for this step in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

/// Approximate nutrition facts for a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NutritionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<String>,
}

/// How hard a recipe is to cook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A complete generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub description: String,
    /// Prep time in minutes.
    pub prep_time: u32,
    /// Cook time in minutes.
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_info: Option<NutritionInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let json = r#"{"ingredients": ["tomato"], "mealCraving": "pasta"}"#;
        let req: RecipeRequest = serde_json::from_str(json).unwrap();
        assert!(req.dietary_restrictions.is_empty());
        assert_eq!(req.preferred_cuisine, "Any");
    }

    #[test]
    fn test_request_camel_case_keys() {
        let json = r#"{
            "ingredients": ["tofu"],
            "mealCraving": "stir fry",
            "dietaryRestrictions": ["vegan"],
            "preferredCuisine": "Thai"
        }"#;
        let req: RecipeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.meal_craving, "stir fry");
        assert_eq!(req.dietary_restrictions, vec!["vegan"]);
        assert_eq!(req.preferred_cuisine, "Thai");
    }

    #[test]
    fn test_recipe_serializes_camel_case() {
        let recipe = Recipe {
            title: "Test".to_string(),
            description: "Test".to_string(),
            prep_time: 10,
            cook_time: 20,
            servings: 4,
            difficulty: Difficulty::Easy,
            ingredients: vec![],
            instructions: vec![],
            tags: vec![],
            nutrition_info: None,
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert!(value.get("prepTime").is_some());
        assert!(value.get("cookTime").is_some());
        assert!(value.get("nutritionInfo").is_none());
    }

    #[test]
    fn test_instruction_omits_empty_optionals() {
        let instruction = Instruction {
            step: 1,
            text: "Chop everything".to_string(),
            time: Some(5),
            temperature: None,
            tips: None,
        };
        let value = serde_json::to_value(&instruction).unwrap();
        assert_eq!(value.get("time").and_then(|v| v.as_u64()), Some(5));
        assert!(value.get("temperature").is_none());
        assert!(value.get("tips").is_none());
    }
}
