//! Recipe generation: LLM-backed with a deterministic template fallback.

mod generate;
mod prompts;
mod template;

pub use generate::RecipeGenerator;
pub use prompts::render_recipe_prompt;
pub use template::build_recipe;
