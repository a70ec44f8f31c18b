pub mod detect;
pub mod error;
pub mod image;
pub mod labels;
pub mod llm;
pub mod recipe;
pub mod types;

pub use detect::{DetectFallback, DetectorConfig, IngredientDetector, RawDetection};
pub use error::{DetectError, GenerateError};
pub use image::{decode_image, validate_image, MAX_FILE_SIZE};
pub use labels::{map_detections, LabelTable};
pub use recipe::{build_recipe, RecipeGenerator};
pub use types::{
    DetectionResult, Difficulty, Ingredient, Instruction, NutritionInfo, Recipe, RecipeRequest,
};

/// Unique identifier for this build, generated at compile time.
/// Reported in the service descriptor endpoint.
pub const BUILD_ID: &str = env!("BUILD_ID");
