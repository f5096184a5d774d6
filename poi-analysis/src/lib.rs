pub mod classifier;
pub mod gazetteer;
pub mod taxonomy;

// Re-export commonly used types
pub use classifier::{CategoryMatch, classify};
pub use gazetteer::{DEFAULT_CITY, coordinates_for, default_coordinates};
pub use taxonomy::{
    AI_SUGGESTED_CATEGORY, GROUND_TRUTH_CATEGORY, PoiCategory, UNKNOWN_CATEGORY, all_categories,
    category_by_id,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_and_locate_compose() {
        let result = classify("Kumar Chai Stall", Some("busy tech park entrance"));
        assert_eq!(result.category, "food_beverage");

        let (lat, lng) = coordinates_for("Bangalore");
        assert!((lat - 12.9716).abs() < f64::EPSILON);
        assert!((lng - 77.5946).abs() < f64::EPSILON);
    }

    #[test]
    fn classifier_confidence_stays_in_unit_interval() {
        for category in all_categories() {
            for keyword in category.keywords {
                let result = classify(keyword, None);
                assert!(result.confidence > 0.0 && result.confidence <= 1.0);
            }
        }
    }
}
