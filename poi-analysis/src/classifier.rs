//! Keyword-substring classifier over the static taxonomy.
//!
//! Scores every category by counting keyword hits in the POI name and
//! contextual-rule hits in the optional context string, then keeps the best
//! match. Purely deterministic: no learning, no external data.

use serde::Serialize;

use crate::taxonomy::{self, UNKNOWN_CATEGORY};

/// Score added for each keyword found in the lower-cased name.
const KEYWORD_WEIGHT: f64 = 0.35;

/// Score added for each contextual rule found in the lower-cased context.
const CONTEXT_WEIGHT: f64 = 0.15;

/// Confidence is clamped to this ceiling.
const CONFIDENCE_CEILING: f64 = 0.95;

/// Scores at or below this floor resolve to the `unknown` category.
const UNKNOWN_FLOOR: f64 = 0.3;

/// Best-matching category for a name/context pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatch {
    pub category: &'static str,
    pub confidence: f64,
}

/// Classify a POI name (with optional free-text context) against the taxonomy.
///
/// Matching is case-insensitive substring containment only. The category with
/// the strictly highest confidence wins; ties keep the first category in
/// taxonomy declaration order. When nothing clears the floor the result is
/// `unknown` at exactly the floor confidence.
pub fn classify(name: &str, context: Option<&str>) -> CategoryMatch {
    let name = name.to_lowercase();
    let context = context.map(|c| c.to_lowercase());

    let mut best = CategoryMatch {
        category: UNKNOWN_CATEGORY,
        confidence: UNKNOWN_FLOOR,
    };

    for category in taxonomy::all_categories() {
        let mut score = 0.0;

        for keyword in category.keywords {
            if name.contains(keyword) {
                score += KEYWORD_WEIGHT;
            }
        }

        if let Some(context) = context.as_deref() {
            for rule in category.contextual_rules {
                if context.contains(rule) {
                    score += CONTEXT_WEIGHT;
                }
            }
        }

        let confidence = score.min(CONFIDENCE_CEILING);
        if confidence > best.confidence {
            best = CategoryMatch {
                category: category.id,
                confidence,
            };
        }
    }

    best
}
