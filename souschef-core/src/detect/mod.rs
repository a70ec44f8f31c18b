//! Ingredient detection from fridge photos.
//!
//! The detector runs an object detection model over a decoded image and
//! returns raw labeled boxes. Label mapping to ingredient display names
//! happens separately (see `labels`), so the detector stays agnostic of
//! which label table is in use.

pub mod mock;
pub mod onnx;

use std::env;

use image::DynamicImage;

use crate::error::DetectError;
use crate::labels::LabelTable;

/// Default path to the detection model.
pub const DEFAULT_MODEL_PATH: &str = "models/best.onnx";

/// Default minimum confidence for a detection to count.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;

/// Axis-aligned bounding box in input image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// A single detection as emitted by the model, before label mapping.
#[derive(Debug, Clone)]
pub struct RawDetection {
    /// Raw class label from the model (e.g. "tomato").
    pub label: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Interface for ingredient detection backends.
pub trait IngredientDetector: Send + Sync {
    /// Run detection on a decoded image, keeping detections at or above
    /// the confidence threshold.
    fn detect(
        &self,
        image: &DynamicImage,
        confidence_threshold: f32,
    ) -> Result<Vec<RawDetection>, DetectError>;

    /// Human-readable description of the backend, for logs and the
    /// service descriptor.
    fn describe(&self) -> String;
}

/// What the detect endpoint does when no model is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectFallback {
    /// Return plausible mock ingredients so clients keep working.
    #[default]
    Mock,
    /// Fail the request with a not-found error.
    NotFound,
}

/// Detector configuration.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Path to the ONNX model file.
    pub model_path: String,
    /// Which label table to map raw classes through.
    pub label_table: LabelTable,
    /// Minimum confidence for a detection to count.
    pub confidence_threshold: f32,
    /// Behavior when the model file is missing or fails to load.
    pub fallback: DetectFallback,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            label_table: LabelTable::FineTuned,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            fallback: DetectFallback::Mock,
        }
    }
}

impl DetectorConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `SOUSCHEF_MODEL_PATH`: Model file path (default: "models/best.onnx")
    /// - `SOUSCHEF_LABEL_TABLE`: "fine_tuned" or "generic" (default: "fine_tuned")
    /// - `SOUSCHEF_CONFIDENCE_THRESHOLD`: Minimum confidence (default: 0.25)
    /// - `SOUSCHEF_DETECT_FALLBACK`: "mock" or "not_found" (default: "mock")
    pub fn from_env() -> Self {
        let model_path =
            env::var("SOUSCHEF_MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());

        let label_table = match env::var("SOUSCHEF_LABEL_TABLE").as_deref() {
            Ok("generic") => LabelTable::Generic,
            _ => LabelTable::FineTuned,
        };

        let confidence_threshold = env::var("SOUSCHEF_CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);

        let fallback = match env::var("SOUSCHEF_DETECT_FALLBACK").as_deref() {
            Ok("not_found") => DetectFallback::NotFound,
            _ => DetectFallback::Mock,
        };

        Self {
            model_path,
            label_table,
            confidence_threshold,
            fallback,
        }
    }
}
