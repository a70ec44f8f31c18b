use thiserror::Error;

use crate::llm::LlmError;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("No JSON object found in model output")]
    NoJsonObject,

    #[error("Invalid recipe JSON: {0}")]
    InvalidJson(String),
}
