//! Shared application state, constructed once at startup.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use souschef_core::detect::onnx::OnnxDetector;
use souschef_core::detect::{DetectorConfig, IngredientDetector};
use souschef_core::llm::{self, LlmProvider};

/// State shared across all handlers.
///
/// The detector and LLM provider are loaded once at boot; a `None` means
/// the component was unavailable at startup and the configured fallback
/// applies for the life of the process.
pub struct AppState {
    pub detector: Option<Arc<dyn IngredientDetector>>,
    pub detector_config: DetectorConfig,
    pub llm: Option<Arc<dyn LlmProvider>>,
    /// Random source for mock detection and template recipes. Seedable
    /// so tests can assert deterministic output.
    pub rng: Mutex<StdRng>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build state from environment configuration, loading the detection
    /// model and LLM provider. Neither failure is fatal.
    pub fn from_env() -> Self {
        let detector_config = DetectorConfig::from_env();

        let detector: Option<Arc<dyn IngredientDetector>> =
            match OnnxDetector::load(&detector_config) {
                Ok(detector) => {
                    tracing::info!(detector = %detector.describe(), "Detector ready");
                    Some(Arc::new(detector))
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Detection model unavailable, detect requests use the configured fallback"
                    );
                    None
                }
            };

        let llm: Option<Arc<dyn LlmProvider>> = match llm::create_provider_from_env() {
            Ok(provider) => {
                tracing::info!(
                    provider = provider.provider_name(),
                    model = provider.model_name(),
                    "LLM provider configured"
                );
                Some(Arc::from(provider))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "LLM provider unavailable, recipes use the template fallback"
                );
                None
            }
        };

        Self {
            detector,
            detector_config,
            llm,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}
