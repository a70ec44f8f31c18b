//! Template-based recipe builder.
//!
//! Produces a complete recipe without an LLM. Used as the fallback when
//! no provider is reachable, so the shape mirrors what the LLM path
//! returns.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Difficulty, Ingredient, Instruction, NutritionInfo, Recipe, RecipeRequest};

const UNITS: &[&str] = &["cup", "tbsp", "piece", "clove", "oz"];

const DIFFICULTIES: &[Difficulty] = &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

/// At most this many detected ingredients get their own recipe line.
const MAX_INGREDIENT_LINES: usize = 6;

/// Build a recipe from the request using fixed templates and the given RNG.
pub fn build_recipe<R: Rng + ?Sized>(request: &RecipeRequest, rng: &mut R) -> Recipe {
    let main_ingredient = request
        .ingredients
        .first()
        .map(String::as_str)
        .unwrap_or("Vegetable");

    let title = format!(
        "{} {}",
        title_case(main_ingredient),
        title_case(&request.meal_craving)
    );

    let mut ingredients: Vec<Ingredient> = request
        .ingredients
        .iter()
        .take(MAX_INGREDIENT_LINES)
        .map(|name| Ingredient {
            name: name.clone(),
            amount: rng.gen_range(1..=3).to_string(),
            unit: UNITS.choose(rng).map(|u| u.to_string()),
            notes: if rng.gen::<f64>() > 0.7 {
                Some("fresh".to_string())
            } else {
                None
            },
        })
        .collect();

    ingredients.extend([
        staple("Salt", "1", "tsp"),
        staple("Black pepper", "1/2", "tsp"),
        staple("Olive oil", "2", "tbsp"),
    ]);

    let instructions = vec![
        Instruction {
            step: 1,
            text: "Prepare all ingredients by washing, chopping, and measuring as needed."
                .to_string(),
            time: Some(10),
            temperature: None,
            tips: Some("Having everything ready makes cooking smoother".to_string()),
        },
        Instruction {
            step: 2,
            text: "Heat olive oil in a large pan over medium-high heat.".to_string(),
            time: Some(3),
            temperature: Some("Medium-high heat".to_string()),
            tips: None,
        },
        Instruction {
            step: 3,
            text: format!(
                "Add {} and other main ingredients to the pan.",
                main_ingredient.to_lowercase()
            ),
            time: Some(8),
            temperature: None,
            tips: Some("Don't overcrowd the pan".to_string()),
        },
        Instruction {
            step: 4,
            text: "Season with salt and pepper, cook until tender and flavorful.".to_string(),
            time: Some(12),
            temperature: None,
            tips: Some("Taste and adjust seasoning as needed".to_string()),
        },
        Instruction {
            step: 5,
            text: "Serve hot and enjoy your homemade dish!".to_string(),
            time: None,
            temperature: None,
            tips: Some("Best enjoyed fresh and warm".to_string()),
        },
    ];

    let craving_lower = request.meal_craving.to_lowercase();
    let mut tags = vec!["Homemade".to_string(), "Fresh Ingredients".to_string()];
    if craving_lower.contains("salad") {
        tags.extend(["Healthy".to_string(), "Light".to_string()]);
    } else if craving_lower.contains("pasta") {
        tags.extend(["Italian".to_string(), "Comfort Food".to_string()]);
    } else if craving_lower.contains("stir") {
        tags.extend(["Asian".to_string(), "Quick".to_string()]);
    }
    if request.preferred_cuisine != "Any" {
        tags.push(request.preferred_cuisine.clone());
    }

    Recipe {
        title,
        description: format!(
            "A delicious {} made with fresh ingredients from your fridge.",
            craving_lower
        ),
        prep_time: rng.gen_range(10..=25),
        cook_time: rng.gen_range(15..=35),
        servings: rng.gen_range(2..=6),
        difficulty: *DIFFICULTIES.choose(rng).unwrap_or(&Difficulty::Easy),
        ingredients,
        instructions,
        tags,
        nutrition_info: Some(NutritionInfo {
            calories: Some(rng.gen_range(200..=500)),
            protein: Some(format!("{}g", rng.gen_range(10..=30))),
            carbs: Some(format!("{}g", rng.gen_range(20..=50))),
            fat: Some(format!("{}g", rng.gen_range(5..=20))),
            fiber: Some(format!("{}g", rng.gen_range(3..=10))),
            sugar: Some(format!("{}g", rng.gen_range(5..=15))),
            sodium: Some(format!("{}mg", rng.gen_range(300..=800))),
        }),
    }
}

fn staple(name: &str, amount: &str, unit: &str) -> Ingredient {
    Ingredient {
        name: name.to_string(),
        amount: amount.to_string(),
        unit: Some(unit.to_string()),
        notes: None,
    }
}

/// Uppercase the first letter of each whitespace-separated word.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
