//! Prompt template for recipe generation.

use crate::types::RecipeRequest;

/// JSON shape the model is asked to return.
const RESPONSE_STRUCTURE: &str = r#"{
  "title": "Recipe Name",
  "description": "Brief description",
  "prepTime": 15,
  "cookTime": 30,
  "servings": 4,
  "difficulty": "Easy",
  "ingredients": [
    {"name": "ingredient", "amount": "1", "unit": "cup", "notes": null}
  ],
  "instructions": [
    {"step": 1, "text": "instruction", "time": 5, "temperature": null, "tips": null}
  ],
  "tags": ["tag1"],
  "nutritionInfo": {
    "calories": 350,
    "protein": "20g",
    "carbs": "40g",
    "fat": "15g",
    "fiber": "5g",
    "sugar": "5g",
    "sodium": "400mg"
  }
}"#;

/// Render the recipe generation prompt for a request.
pub fn render_recipe_prompt(request: &RecipeRequest) -> String {
    let ingredients = request.ingredients.join(", ");
    let restrictions = if request.dietary_restrictions.is_empty() {
        "None".to_string()
    } else {
        request.dietary_restrictions.join(", ")
    };

    format!(
        "You are a professional chef AI. Create a detailed recipe.\n\n\
         Available Ingredients: {}\n\
         Dish Type: {}\n\
         Dietary Restrictions: {}\n\
         Preferred Cuisine: {}\n\n\
         Return ONLY a JSON object with this exact structure:\n{}",
        ingredients,
        request.meal_craving,
        restrictions,
        request.preferred_cuisine,
        RESPONSE_STRUCTURE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecipeRequest {
        RecipeRequest {
            ingredients: vec!["Tomatoes".to_string(), "Cheese".to_string()],
            meal_craving: "pasta".to_string(),
            dietary_restrictions: vec![],
            preferred_cuisine: "Italian".to_string(),
        }
    }

    #[test]
    fn test_prompt_includes_request_fields() {
        let prompt = render_recipe_prompt(&request());
        assert!(prompt.contains("Available Ingredients: Tomatoes, Cheese"));
        assert!(prompt.contains("Dish Type: pasta"));
        assert!(prompt.contains("Preferred Cuisine: Italian"));
        assert!(prompt.contains("\"prepTime\": 15"));
    }

    #[test]
    fn test_empty_restrictions_render_as_none() {
        let prompt = render_recipe_prompt(&request());
        assert!(prompt.contains("Dietary Restrictions: None"));
    }

    #[test]
    fn test_restrictions_joined() {
        let mut req = request();
        req.dietary_restrictions = vec!["vegetarian".to_string(), "gluten-free".to_string()];
        let prompt = render_recipe_prompt(&req);
        assert!(prompt.contains("Dietary Restrictions: vegetarian, gluten-free"));
    }
}
