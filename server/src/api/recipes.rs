use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use utoipa::OpenApi;

use souschef_core::{build_recipe, Recipe, RecipeGenerator, RecipeRequest};

use crate::state::SharedState;

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Generated recipe", body = Recipe),
        (status = 422, description = "Missing or mistyped request fields")
    )
)]
pub async fn generate(State(state): State<SharedState>, Json(request): Json<RecipeRequest>) -> Response {
    if let Some(provider) = &state.llm {
        let generator = RecipeGenerator::new(provider.clone());
        match generator.generate(&request).await {
            Ok(recipe) => return Json(recipe).into_response(),
            Err(e) => {
                tracing::warn!(error = %e, "LLM generation failed, using template fallback");
            }
        }
    }

    let recipe = {
        let mut rng = state.rng.lock().unwrap();
        build_recipe(&request, &mut *rng)
    };
    Json(recipe).into_response()
}

#[derive(OpenApi)]
#[openapi(
    paths(generate),
    components(schemas(
        Recipe,
        RecipeRequest,
        souschef_core::Ingredient,
        souschef_core::Instruction,
        souschef_core::NutritionInfo,
        souschef_core::Difficulty,
    ))
)]
pub struct ApiDoc;
