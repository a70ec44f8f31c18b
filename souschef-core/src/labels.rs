//! Mapping from raw model class labels to ingredient display names.
//!
//! A fine-tuned food model emits ingredient classes directly; a generic
//! COCO-trained model only knows a handful of food classes. Both are
//! normalized through a label table so the rest of the pipeline sees
//! display names like "Tomato" regardless of the model in use.

use crate::detect::RawDetection;

/// Fine-tuned model classes and their display names.
const FINE_TUNED: &[(&str, &str)] = &[
    ("beef", "Beef"),
    ("pork", "Pork"),
    ("chicken", "Chicken"),
    ("butter", "Butter"),
    ("cheese", "Cheese"),
    ("milk", "Milk"),
    ("broccoli", "Broccoli"),
    ("carrot", "Carrot"),
    ("cucumber", "Cucumber"),
    ("lettuce", "Lettuce"),
    ("tomato", "Tomato"),
];

/// Food classes a generic COCO-trained model can recognize.
const GENERIC: &[(&str, &str)] = &[
    ("banana", "Banana"),
    ("apple", "Apple"),
    ("sandwich", "Sandwich"),
    ("orange", "Orange"),
    ("broccoli", "Broccoli"),
    ("carrot", "Carrot"),
    ("hot dog", "Hot Dog"),
    ("pizza", "Pizza"),
    ("donut", "Donut"),
    ("cake", "Cake"),
];

/// Which label table to use for mapping detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelTable {
    /// Model fine-tuned on fridge ingredients.
    #[default]
    FineTuned,
    /// Stock COCO model; only its food classes map to ingredients.
    Generic,
}

impl LabelTable {
    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            LabelTable::FineTuned => FINE_TUNED,
            LabelTable::Generic => GENERIC,
        }
    }

    /// Look up the display name for a raw class label.
    ///
    /// Lookup is case-insensitive; labels not in the table return `None`.
    pub fn display_name(self, raw: &str) -> Option<&'static str> {
        let lower = raw.to_lowercase();
        self.entries()
            .iter()
            .find(|(label, _)| *label == lower)
            .map(|(_, name)| *name)
    }
}

/// Map raw detections to ingredient display names.
///
/// Detections whose label is not in the table are dropped. Duplicate
/// ingredients keep the first detection's confidence, preserving the
/// order they were first seen.
pub fn map_detections(detections: &[RawDetection], table: LabelTable) -> (Vec<String>, Vec<f32>) {
    let mut ingredients = Vec::new();
    let mut confidence = Vec::new();

    for det in detections {
        let Some(name) = table.display_name(&det.label) else {
            continue;
        };
        if ingredients.iter().any(|i| i == name) {
            continue;
        }
        ingredients.push(name.to_string());
        confidence.push(det.confidence);
    }

    (ingredients, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::BoundingBox;

    fn det(label: &str, confidence: f32) -> RawDetection {
        RawDetection {
            label: label.to_string(),
            confidence,
            bbox: BoundingBox {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 10.0,
            },
        }
    }

    #[test]
    fn test_fine_tuned_lookup_is_case_insensitive() {
        assert_eq!(LabelTable::FineTuned.display_name("Tomato"), Some("Tomato"));
        assert_eq!(LabelTable::FineTuned.display_name("CHEESE"), Some("Cheese"));
        assert_eq!(LabelTable::FineTuned.display_name("pizza"), None);
    }

    #[test]
    fn test_generic_table_only_knows_coco_food() {
        assert_eq!(LabelTable::Generic.display_name("pizza"), Some("Pizza"));
        assert_eq!(LabelTable::Generic.display_name("beef"), None);
    }

    #[test]
    fn test_map_drops_unknown_labels() {
        let detections = vec![det("tomato", 0.9), det("person", 0.99), det("milk", 0.8)];
        let (ingredients, confidence) = map_detections(&detections, LabelTable::FineTuned);
        assert_eq!(ingredients, vec!["Tomato", "Milk"]);
        assert_eq!(confidence, vec![0.9, 0.8]);
    }

    #[test]
    fn test_map_dedups_first_seen() {
        let detections = vec![det("carrot", 0.85), det("carrot", 0.95), det("tomato", 0.7)];
        let (ingredients, confidence) = map_detections(&detections, LabelTable::FineTuned);
        assert_eq!(ingredients, vec!["Carrot", "Tomato"]);
        assert_eq!(confidence, vec![0.85, 0.7]);
    }

    #[test]
    fn test_map_empty_detections() {
        let (ingredients, confidence) = map_detections(&[], LabelTable::FineTuned);
        assert!(ingredients.is_empty());
        assert!(confidence.is_empty());
    }
}
