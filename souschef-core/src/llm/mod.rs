//! LLM provider abstraction for recipe generation.
//!
//! This module provides a trait-based abstraction over LLM backends
//! (a local Ollama server in production, a fake for tests).

mod fake;
mod ollama;

pub use fake::{FakeProvider, CANNED_RECIPE_JSON};
pub use ollama::OllamaProvider;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Default Ollama base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "qwen2.5:3b";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM providers.
///
/// Implementations should be stateless and thread-safe. The provider is
/// responsible for making API calls and returning the model's text response.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the LLM and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Whether the backing service is reachable right now.
    async fn available(&self) -> bool {
        true
    }

    /// Get the provider name (e.g., "ollama", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "qwen2.5:3b").
    fn model_name(&self) -> &str;
}

/// Create a provider from environment variables.
///
/// Configuration:
/// - `SOUSCHEF_LLM_PROVIDER`: "ollama" | "fake" (default: "ollama")
/// - `OLLAMA_BASE_URL`: Ollama server URL (default: "http://localhost:11434")
/// - `SOUSCHEF_LLM_MODEL`: Model name (default: "qwen2.5:3b")
/// - `SOUSCHEF_LLM_TIMEOUT_SECS`: Request timeout (default: 60)
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider = std::env::var("SOUSCHEF_LLM_PROVIDER").unwrap_or_else(|_| "ollama".to_string());

    match provider.as_str() {
        "fake" => Ok(Box::new(FakeProvider::default())),
        "ollama" => {
            let base_url =
                std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
            let model =
                std::env::var("SOUSCHEF_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
            let timeout_secs = std::env::var("SOUSCHEF_LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS);
            Ok(Box::new(OllamaProvider::new(
                base_url,
                model,
                Duration::from_secs(timeout_secs),
            )?))
        }
        other => Err(LlmError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
