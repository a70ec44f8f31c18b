//! ONNX detection backend built on tract.
//!
//! Loads a YOLOv8-style exported model, letterboxes the input to 640x640,
//! and decodes the `[1, 4+nc, N]` output into labeled boxes with per-class
//! non-maximum suppression.

use std::cmp::Ordering;

use image::{imageops, imageops::FilterType, DynamicImage, GenericImageView, Rgb, RgbImage};
use tract_onnx::prelude::*;

use crate::detect::{BoundingBox, DetectorConfig, IngredientDetector, RawDetection};
use crate::error::DetectError;
use crate::labels::LabelTable;

/// Model input edge length.
const INPUT_SIZE: u32 = 640;

/// IoU threshold for non-maximum suppression.
const IOU_THRESHOLD: f32 = 0.45;

/// Classes of the fine-tuned fridge ingredient model, in training order.
const FOOD_CLASSES: &[&str] = &[
    "beef", "pork", "chicken", "butter", "cheese", "milk", "broccoli", "carrot", "cucumber",
    "lettuce", "tomato",
];

/// The 80 COCO classes, in training order.
const COCO_CLASSES: &[&str] = &[
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

type OnnxPlan = TypedSimplePlan<TypedModel>;

/// Detector backed by a tract-compiled ONNX model.
pub struct OnnxDetector {
    model: OnnxPlan,
    class_names: &'static [&'static str],
    model_path: String,
}

impl OnnxDetector {
    /// Load and compile the model at the configured path.
    pub fn load(config: &DetectorConfig) -> Result<Self, DetectError> {
        let model = tract_onnx::onnx()
            .model_for_path(&config.model_path)
            .map_err(|e| DetectError::ModelLoad(e.to_string()))?
            .with_input_fact(
                0,
                f32::fact([1, 3, INPUT_SIZE as usize, INPUT_SIZE as usize]).into(),
            )
            .map_err(|e| DetectError::ModelLoad(e.to_string()))?
            .into_optimized()
            .map_err(|e| DetectError::ModelLoad(e.to_string()))?
            .into_runnable()
            .map_err(|e| DetectError::ModelLoad(e.to_string()))?;

        let class_names = match config.label_table {
            LabelTable::FineTuned => FOOD_CLASSES,
            LabelTable::Generic => COCO_CLASSES,
        };

        tracing::info!(
            model_path = %config.model_path,
            classes = class_names.len(),
            "Loaded ONNX detection model"
        );

        Ok(Self {
            model,
            class_names,
            model_path: config.model_path.clone(),
        })
    }
}

impl IngredientDetector for OnnxDetector {
    fn detect(
        &self,
        image: &DynamicImage,
        confidence_threshold: f32,
    ) -> Result<Vec<RawDetection>, DetectError> {
        let (canvas, letterbox) = letterbox_image(image);

        let size = INPUT_SIZE as usize;
        let tensor: Tensor =
            tract_ndarray::Array4::from_shape_fn((1, 3, size, size), |(_, c, y, x)| {
                canvas.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
            })
            .into();

        let result = self
            .model
            .run(tvec!(tensor.into()))
            .map_err(|e| DetectError::Inference(e.to_string()))?;

        let output = result[0]
            .to_array_view::<f32>()
            .map_err(|e| DetectError::Inference(e.to_string()))?;

        let shape = output.shape();
        if shape.len() != 3 || shape[1] < 5 {
            return Err(DetectError::Inference(format!(
                "Unexpected output shape: {:?}",
                shape
            )));
        }
        let num_classes = shape[1] - 4;
        let num_boxes = shape[2];

        let mut candidates = Vec::new();
        for n in 0..num_boxes {
            let mut class_id = 0;
            let mut score = f32::NEG_INFINITY;
            for c in 0..num_classes {
                let v = output[[0, 4 + c, n]];
                if v > score {
                    score = v;
                    class_id = c;
                }
            }
            if score < confidence_threshold {
                continue;
            }

            let cx = output[[0, 0, n]];
            let cy = output[[0, 1, n]];
            let w = output[[0, 2, n]];
            let h = output[[0, 3, n]];
            let bbox = letterbox.to_original(cx, cy, w, h, image.width(), image.height());

            candidates.push(Candidate {
                class_id,
                confidence: score,
                bbox,
            });
        }

        let kept = nms(candidates);

        Ok(kept
            .into_iter()
            .filter_map(|c| {
                self.class_names.get(c.class_id).map(|label| RawDetection {
                    label: (*label).to_string(),
                    confidence: c.confidence,
                    bbox: c.bbox,
                })
            })
            .collect())
    }

    fn describe(&self) -> String {
        format!(
            "ONNX detector ({} classes, model: {})",
            self.class_names.len(),
            self.model_path
        )
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    class_id: usize,
    confidence: f32,
    bbox: BoundingBox,
}

/// Scale and padding applied when letterboxing an image to the model input.
#[derive(Debug, Clone, Copy)]
struct Letterbox {
    scale: f32,
    pad_x: f32,
    pad_y: f32,
}

impl Letterbox {
    /// Map a center-format box in letterbox coordinates back to pixel
    /// coordinates of the original image, clamped to its bounds.
    fn to_original(
        &self,
        cx: f32,
        cy: f32,
        w: f32,
        h: f32,
        orig_w: u32,
        orig_h: u32,
    ) -> BoundingBox {
        let x1 = (cx - w / 2.0 - self.pad_x) / self.scale;
        let y1 = (cy - h / 2.0 - self.pad_y) / self.scale;
        let x2 = (cx + w / 2.0 - self.pad_x) / self.scale;
        let y2 = (cy + h / 2.0 - self.pad_y) / self.scale;
        BoundingBox {
            x1: x1.clamp(0.0, orig_w as f32),
            y1: y1.clamp(0.0, orig_h as f32),
            x2: x2.clamp(0.0, orig_w as f32),
            y2: y2.clamp(0.0, orig_h as f32),
        }
    }
}

/// Resize the image to fit the model input, padding the borders gray.
fn letterbox_image(image: &DynamicImage) -> (RgbImage, Letterbox) {
    let (orig_w, orig_h) = image.dimensions();
    let scale = (INPUT_SIZE as f32 / orig_w as f32).min(INPUT_SIZE as f32 / orig_h as f32);
    let new_w = ((orig_w as f32 * scale).round() as u32).max(1);
    let new_h = ((orig_h as f32 * scale).round() as u32).max(1);

    let resized = image
        .resize_exact(new_w, new_h, FilterType::Triangle)
        .to_rgb8();

    let pad_x = (INPUT_SIZE - new_w) / 2;
    let pad_y = (INPUT_SIZE - new_h) / 2;

    let mut canvas = RgbImage::from_pixel(INPUT_SIZE, INPUT_SIZE, Rgb([114, 114, 114]));
    imageops::replace(&mut canvas, &resized, pad_x as i64, pad_y as i64);

    (
        canvas,
        Letterbox {
            scale,
            pad_x: pad_x as f32,
            pad_y: pad_y as f32,
        },
    )
}

fn iou(a: &BoundingBox, b: &BoundingBox) -> f32 {
    let ix1 = a.x1.max(b.x1);
    let iy1 = a.y1.max(b.y1);
    let ix2 = a.x2.min(b.x2);
    let iy2 = a.y2.min(b.y2);

    let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
    let area_a = (a.x2 - a.x1).max(0.0) * (a.y2 - a.y1).max(0.0);
    let area_b = (b.x2 - b.x1).max(0.0) * (b.y2 - b.y1).max(0.0);
    let union = area_a + area_b - inter;

    if union <= 0.0 {
        0.0
    } else {
        inter / union
    }
}

/// Greedy per-class non-maximum suppression, highest confidence first.
fn nms(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let suppressed = kept.iter().any(|k| {
            k.class_id == candidate.class_id && iou(&k.bbox, &candidate.bbox) > IOU_THRESHOLD
        });
        if !suppressed {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x1: f32, y1: f32, x2: f32, y2: f32) -> BoundingBox {
        BoundingBox { x1, y1, x2, y2 }
    }

    #[test]
    fn test_iou_disjoint() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(20.0, 20.0, 30.0, 30.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn test_iou_identical() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_nms_suppresses_overlapping_same_class() {
        let candidates = vec![
            Candidate {
                class_id: 0,
                confidence: 0.9,
                bbox: bbox(0.0, 0.0, 10.0, 10.0),
            },
            Candidate {
                class_id: 0,
                confidence: 0.8,
                bbox: bbox(1.0, 1.0, 11.0, 11.0),
            },
        ];
        let kept = nms(candidates);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].confidence, 0.9);
    }

    #[test]
    fn test_nms_keeps_overlapping_different_class() {
        let candidates = vec![
            Candidate {
                class_id: 0,
                confidence: 0.9,
                bbox: bbox(0.0, 0.0, 10.0, 10.0),
            },
            Candidate {
                class_id: 1,
                confidence: 0.8,
                bbox: bbox(1.0, 1.0, 11.0, 11.0),
            },
        ];
        let kept = nms(candidates);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_letterbox_wide_image_pads_vertically() {
        let img = DynamicImage::new_rgb8(1280, 640);
        let (canvas, lb) = letterbox_image(&img);
        assert_eq!(canvas.dimensions(), (INPUT_SIZE, INPUT_SIZE));
        assert_eq!(lb.pad_x, 0.0);
        assert_eq!(lb.pad_y, 160.0);
        assert!((lb.scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_letterbox_roundtrip_box() {
        let img = DynamicImage::new_rgb8(1280, 640);
        let (_, lb) = letterbox_image(&img);
        // Center box of the letterboxed frame maps back to center of the image.
        let b = lb.to_original(320.0, 320.0, 100.0, 100.0, 1280, 640);
        assert!((b.x1 - 540.0).abs() < 1e-3);
        assert!((b.y1 - 220.0).abs() < 1e-3);
        assert!((b.x2 - 740.0).abs() < 1e-3);
        assert!((b.y2 - 420.0).abs() < 1e-3);
    }
}
