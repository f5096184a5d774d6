//! Static POI category taxonomy.
//!
//! Categories are declared once at compile time and never change at runtime.
//! Declaration order is significant: the classifier keeps the first-seen
//! category on a tied score.

use serde::Serialize;

/// Category id used when no taxonomy category clears the scoring floor.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Sentinel category id for synthetic AI-suggested points.
pub const AI_SUGGESTED_CATEGORY: &str = "ai_suggested";

/// Sentinel category id for synthetic ground-truth-verified points.
pub const GROUND_TRUTH_CATEGORY: &str = "ground_truth_verified";

/// A single POI category definition.
///
/// `keywords` score against a POI name, `contextual_rules` against free-text
/// context. Both are matched as lower-cased substrings.
#[derive(Debug, Clone, Serialize)]
pub struct PoiCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub contextual_rules: &'static [&'static str],
}

/// All taxonomy categories, in declaration (tie-breaking) order.
pub fn all_categories() -> &'static [PoiCategory] {
    CATEGORIES
}

/// Look up a category definition by id.
pub fn category_by_id(id: &str) -> Option<&'static PoiCategory> {
    CATEGORIES.iter().find(|c| c.id == id)
}

static CATEGORIES: &[PoiCategory] = &[
    PoiCategory {
        id: "food_beverage",
        name: "Food & Beverage",
        description: "Eateries and drink outlets serving walk-in customers",
        keywords: &[
            "chai", "tea", "coffee", "cafe", "restaurant", "dhaba", "bakery", "juice", "snack",
            "food", "tiffin",
        ],
        contextual_rules: &[
            "office crowd",
            "it park",
            "tech park",
            "high footfall",
            "student area",
            "late night",
        ],
    },
    PoiCategory {
        id: "retail_general",
        name: "Retail & General Stores",
        description: "Daily-essentials retail from kirana counters to supermarkets",
        keywords: &[
            "kirana",
            "grocery",
            "supermarket",
            "store",
            "mart",
            "provision",
            "stationery",
        ],
        contextual_rules: &[
            "residential",
            "daily essentials",
            "family area",
            "housing society",
        ],
    },
    PoiCategory {
        id: "health_wellness",
        name: "Health & Wellness",
        description: "Pharmacies, clinics and diagnostic services",
        keywords: &[
            "pharmacy",
            "chemist",
            "clinic",
            "hospital",
            "diagnostic",
            "medical",
            "lab",
        ],
        contextual_rules: &["residential", "senior citizens", "hospital nearby"],
    },
    PoiCategory {
        id: "fitness_sports",
        name: "Fitness & Sports",
        description: "Gyms, studios and sports facilities",
        keywords: &["gym", "fitness", "yoga", "crossfit", "sports", "badminton"],
        contextual_rules: &["young professionals", "tech park", "apartment complex"],
    },
    PoiCategory {
        id: "personal_services",
        name: "Personal Services",
        description: "Grooming, laundry and repair services",
        keywords: &["salon", "spa", "barber", "parlour", "laundry", "tailor", "repair"],
        contextual_rules: &["residential", "commercial", "walk-in traffic"],
    },
    PoiCategory {
        id: "electronics_mobile",
        name: "Electronics & Mobile",
        description: "Device sales, accessories and servicing",
        keywords: &["electronics", "mobile", "phone", "computer", "laptop", "gadget"],
        contextual_rules: &["commercial", "market street", "transit hub"],
    },
    PoiCategory {
        id: "education_training",
        name: "Education & Training",
        description: "Coaching centres, tuition and skill institutes",
        keywords: &[
            "coaching",
            "tuition",
            "academy",
            "institute",
            "training",
            "school",
        ],
        contextual_rules: &["residential", "student area", "college nearby"],
    },
    PoiCategory {
        id: "finance_business",
        name: "Finance & Business Services",
        description: "Banking touchpoints and business support services",
        keywords: &["bank", "atm", "insurance", "finance", "consultancy", "accounting"],
        contextual_rules: &["commercial", "office district", "market area"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for category in all_categories() {
            assert!(seen.insert(category.id), "duplicate category id {}", category.id);
        }
    }

    #[test]
    fn sentinel_ids_do_not_collide_with_taxonomy() {
        for sentinel in [UNKNOWN_CATEGORY, AI_SUGGESTED_CATEGORY, GROUND_TRUTH_CATEGORY] {
            assert!(category_by_id(sentinel).is_none());
        }
    }

    #[test]
    fn every_category_has_keywords_and_rules() {
        for category in all_categories() {
            assert!(!category.keywords.is_empty());
            assert!(!category.contextual_rules.is_empty());
        }
    }
}
