//! LLM-backed recipe generation.
//!
//! Renders the prompt, calls the provider, and parses the model output
//! leniently: scalar fields fall back to defaults, but a recipe without
//! ingredients or instructions is rejected so the caller can fall back
//! to the template builder.

use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::error::GenerateError;
use crate::llm::LlmProvider;
use crate::recipe::prompts::render_recipe_prompt;
use crate::types::{Difficulty, Ingredient, Instruction, NutritionInfo, Recipe, RecipeRequest};

/// Generates recipes through an LLM provider.
#[derive(Debug)]
pub struct RecipeGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl RecipeGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Generate a recipe for the request.
    pub async fn generate(&self, request: &RecipeRequest) -> Result<Recipe, GenerateError> {
        let prompt = render_recipe_prompt(request);
        let response = self.provider.complete(&prompt).await?;
        tracing::debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            response_len = response.len(),
            "LLM response received"
        );
        parse_recipe(&response)
    }
}

/// Parse a recipe out of raw model output.
pub fn parse_recipe(response: &str) -> Result<Recipe, GenerateError> {
    let json = extract_json_object(response).ok_or(GenerateError::NoJsonObject)?;
    let parsed: LlmRecipe =
        serde_json::from_str(&json).map_err(|e| GenerateError::InvalidJson(e.to_string()))?;
    Ok(parsed.into_recipe())
}

/// Extract the outermost JSON object from model output.
///
/// Strips markdown code fences first, then takes the substring from the
/// first `{` to the last `}`.
fn extract_json_object(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let cleaned = if trimmed.starts_with("```") {
        trimmed
            .replace("```json", "")
            .replace("```", "")
            .trim()
            .to_string()
    } else {
        trimmed.to_string()
    };

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    Some(cleaned[start..=end].to_string())
}

/// Recipe as the model returns it, with lenient scalar fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmRecipe {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_description")]
    description: String,
    #[serde(default = "default_prep_time")]
    prep_time: u32,
    #[serde(default = "default_cook_time")]
    cook_time: u32,
    #[serde(default = "default_servings")]
    servings: u32,
    #[serde(
        default = "default_difficulty",
        deserialize_with = "lenient_difficulty"
    )]
    difficulty: Difficulty,
    ingredients: Vec<LlmIngredient>,
    instructions: Vec<LlmInstruction>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    nutrition_info: Option<NutritionInfo>,
}

#[derive(Debug, Deserialize)]
struct LlmIngredient {
    name: String,
    #[serde(default = "default_amount")]
    amount: String,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LlmInstruction {
    step: u32,
    text: String,
    #[serde(default)]
    time: Option<u32>,
    #[serde(default)]
    temperature: Option<String>,
    #[serde(default)]
    tips: Option<String>,
}

fn default_title() -> String {
    "Generated Recipe".to_string()
}

fn default_description() -> String {
    "A recipe made from your ingredients.".to_string()
}

fn default_prep_time() -> u32 {
    15
}

fn default_cook_time() -> u32 {
    30
}

fn default_servings() -> u32 {
    4
}

fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}

fn default_amount() -> String {
    "1".to_string()
}

/// Accept "easy"/"Medium"/"HARD" etc., anything else maps to Easy.
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Difficulty, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(match raw.to_lowercase().as_str() {
        "medium" => Difficulty::Medium,
        "hard" => Difficulty::Hard,
        _ => Difficulty::Easy,
    })
}

impl LlmRecipe {
    fn into_recipe(self) -> Recipe {
        Recipe {
            title: self.title,
            description: self.description,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| Ingredient {
                    name: i.name,
                    amount: i.amount,
                    unit: i.unit,
                    notes: i.notes,
                })
                .collect(),
            instructions: self
                .instructions
                .into_iter()
                .map(|i| Instruction {
                    step: i.step,
                    text: i.text,
                    time: i.time,
                    temperature: i.temperature,
                    tips: i.tips,
                })
                .collect(),
            tags: self.tags,
            nutrition_info: self.nutrition_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{FakeProvider, CANNED_RECIPE_JSON};

    const MINIMAL: &str = r#"{
        "ingredients": [{"name": "Eggs"}],
        "instructions": [{"step": 1, "text": "Scramble the eggs."}]
    }"#;

    #[test]
    fn test_extract_plain_object() {
        let json = extract_json_object(r#"{"a": 1}"#).unwrap();
        assert_eq!(json, r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_strips_fences() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(text).unwrap(), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_from_surrounding_prose() {
        let text = "Here is your recipe:\n{\"a\": 1}\nEnjoy!";
        assert_eq!(extract_json_object(text).unwrap(), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_none_without_object() {
        assert!(extract_json_object("no json here").is_none());
    }

    #[test]
    fn test_parse_canned_recipe() {
        let recipe = parse_recipe(CANNED_RECIPE_JSON).unwrap();
        assert_eq!(recipe.title, "Tomato Basil Pasta");
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.instructions.len(), 2);
    }

    #[test]
    fn test_parse_fills_scalar_defaults() {
        let recipe = parse_recipe(MINIMAL).unwrap();
        assert_eq!(recipe.title, "Generated Recipe");
        assert_eq!(recipe.prep_time, 15);
        assert_eq!(recipe.cook_time, 30);
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.difficulty, Difficulty::Easy);
        assert_eq!(recipe.ingredients[0].amount, "1");
        assert!(recipe.nutrition_info.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_ingredients() {
        let result = parse_recipe(r#"{"title": "X", "instructions": []}"#);
        assert!(matches!(result, Err(GenerateError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_rejects_no_object() {
        assert!(matches!(
            parse_recipe("sorry, I cannot help"),
            Err(GenerateError::NoJsonObject)
        ));
    }

    #[test]
    fn test_lenient_difficulty_casing() {
        let json = r#"{
            "difficulty": "HARD",
            "ingredients": [{"name": "Eggs"}],
            "instructions": [{"step": 1, "text": "Cook."}]
        }"#;
        let recipe = parse_recipe(json).unwrap();
        assert_eq!(recipe.difficulty, Difficulty::Hard);
    }

    #[tokio::test]
    async fn test_generate_with_fake_provider() {
        let generator = RecipeGenerator::new(Arc::new(FakeProvider::default()));
        let request = RecipeRequest {
            ingredients: vec!["Tomatoes".to_string()],
            meal_craving: "pasta".to_string(),
            dietary_restrictions: vec![],
            preferred_cuisine: "Any".to_string(),
        };
        let recipe = generator.generate(&request).await.unwrap();
        assert_eq!(recipe.title, "Tomato Basil Pasta");
    }

    #[tokio::test]
    async fn test_generate_propagates_parse_failure() {
        let provider = FakeProvider::new().with_default_response("not json at all");
        let generator = RecipeGenerator::new(Arc::new(provider));
        let request = RecipeRequest {
            ingredients: vec![],
            meal_craving: "soup".to_string(),
            dietary_restrictions: vec![],
            preferred_cuisine: "Any".to_string(),
        };
        let result = generator.generate(&request).await;
        assert!(matches!(result, Err(GenerateError::NoJsonObject)));
    }
}
