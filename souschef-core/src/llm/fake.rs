//! Fake LLM provider for testing.
//!
//! Responses are matched by checking if the prompt contains a registered
//! substring, allowing tests to run without a live Ollama server.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{LlmError, LlmProvider};

/// A canned recipe response in the shape the generation prompt asks for.
pub const CANNED_RECIPE_JSON: &str = r#"{
    "title": "Tomato Basil Pasta",
    "description": "A quick weeknight pasta with fresh tomatoes.",
    "prepTime": 10,
    "cookTime": 20,
    "servings": 4,
    "difficulty": "Easy",
    "ingredients": [
        {"name": "Tomatoes", "amount": "3", "unit": "piece", "notes": "diced"},
        {"name": "Pasta", "amount": "12", "unit": "oz", "notes": null}
    ],
    "instructions": [
        {"step": 1, "text": "Boil the pasta.", "time": 10, "temperature": null, "tips": null},
        {"step": 2, "text": "Simmer the tomatoes and toss.", "time": 10, "temperature": "Medium heat", "tips": "Save some pasta water."}
    ],
    "tags": ["Pasta", "Quick"],
    "nutritionInfo": {"calories": 420, "protein": "14g", "carbs": "70g", "fat": "9g", "fiber": "5g", "sugar": "6g", "sodium": "400mg"}
}"#;

/// A fake LLM provider for testing.
///
/// If no registered substring matches, returns a default response or error.
#[derive(Debug)]
pub struct FakeProvider {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
    /// What `available()` reports.
    available: bool,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some(CANNED_RECIPE_JSON.to_string()),
            available: true,
        }
    }
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            available: true,
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Make `available()` report false, for exercising fallback paths.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt: {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    async fn available(&self) -> bool {
        self.available
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_matching() {
        let provider = FakeProvider::with_response("pasta", "noodles");
        let result = provider.complete("Make me some pasta").await.unwrap();
        assert_eq!(result, "noodles");
    }

    #[tokio::test]
    async fn test_fake_provider_case_insensitive() {
        let provider = FakeProvider::with_response("PASTA", "noodles");
        let result = provider.complete("pasta please").await.unwrap();
        assert_eq!(result, "noodles");
    }

    #[tokio::test]
    async fn test_fake_provider_no_match() {
        let provider = FakeProvider::new();
        let result = provider.complete("random prompt").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_provider_default_is_canned_recipe() {
        let provider = FakeProvider::default();
        let result = provider.complete("anything").await.unwrap();
        assert!(result.contains("Tomato Basil Pasta"));
    }

    #[tokio::test]
    async fn test_unavailable() {
        let provider = FakeProvider::default().unavailable();
        assert!(!provider.available().await);
    }
}
