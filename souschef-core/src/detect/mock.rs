//! Mock detection used when no model is loaded.
//!
//! Returns a random sample of plausible fridge ingredients so clients
//! can exercise the full flow without model weights on disk.

use rand::seq::SliceRandom;
use rand::Rng;

/// Ingredients the mock detector samples from.
pub const MOCK_INGREDIENTS: &[&str] = &[
    "Tomatoes",
    "Bell Peppers",
    "Onions",
    "Carrots",
    "Broccoli",
    "Cheese",
    "Milk",
    "Eggs",
    "Chicken Breast",
    "Garlic",
    "Spinach",
    "Potatoes",
    "Mushrooms",
    "Cucumber",
    "Lettuce",
];

/// Sample 4 to 8 distinct mock ingredients with plausible confidences.
pub fn detect_mock<R: Rng + ?Sized>(rng: &mut R) -> (Vec<String>, Vec<f32>) {
    let count = rng.gen_range(4..=8);
    let ingredients: Vec<String> = MOCK_INGREDIENTS
        .choose_multiple(rng, count)
        .map(|s| s.to_string())
        .collect();
    let confidence: Vec<f32> = ingredients
        .iter()
        .map(|_| (rng.gen_range(0.7f32..0.95) * 100.0).round() / 100.0)
        .collect();
    (ingredients, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mock_count_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let (ingredients, confidence) = detect_mock(&mut rng);
            assert!((4..=8).contains(&ingredients.len()));
            assert_eq!(ingredients.len(), confidence.len());
        }
    }

    #[test]
    fn test_mock_ingredients_distinct_and_known() {
        let mut rng = StdRng::seed_from_u64(42);
        let (ingredients, _) = detect_mock(&mut rng);
        for (i, a) in ingredients.iter().enumerate() {
            assert!(MOCK_INGREDIENTS.contains(&a.as_str()));
            assert!(!ingredients[i + 1..].contains(a));
        }
    }

    #[test]
    fn test_mock_confidence_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let (_, confidence) = detect_mock(&mut rng);
            for c in confidence {
                assert!((0.7..=0.95).contains(&c));
                // Rounded to two decimal places.
                assert!((c * 100.0 - (c * 100.0).round()).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_mock_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        assert_eq!(detect_mock(&mut a), detect_mock(&mut b));
    }
}
