//! Analysis orchestrator.
//!
//! Composes the interpreter's output with synthetic AI-suggestion points and
//! a synthetic ground-truth validation subset, then assembles the final
//! result payload and map viewport. Randomness is fresh per call; results are
//! intentionally not reproducible across calls.

use poi_analysis::{AI_SUGGESTED_CATEGORY, GROUND_TRUTH_CATEGORY, classify, coordinates_for};
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::interpreter::QueryInterpreter;
use crate::models::{
    AiReasoning, AnalysisResult, GroundTruth, Poi, PoiAttributes, QueryInterpretation, QueryType,
    Visualization,
};

/// Every analysis produces exactly this many AI suggestions.
const SUGGESTION_COUNT: usize = 5;

/// Coordinate jitter for AI suggestions, degrees per axis.
const SUGGESTION_JITTER: f64 = 0.02;

/// Tighter jitter for verified points.
const VERIFIED_JITTER: f64 = 0.0175;

const MAP_ZOOM: u32 = 13;

/// Accuracy is reported capped at this percentage.
const ACCURACY_CAP: u32 = 70;

const LOCATION_SITE_NAMES: [&str; SUGGESTION_COUNT] = [
    "Prime Junction Site",
    "High Street Frontage",
    "Market Road Plot",
    "Gateway Crossing Unit",
    "Neighbourhood Hub Corner",
];

const MARKET_SITE_NAMES: [&str; SUGGESTION_COUNT] = [
    "Emerging Demand Pocket",
    "Untapped Catchment Zone",
    "Growth Corridor Block",
    "Weekend Footfall Cluster",
    "Daytime Office Belt",
];

const COMPETITOR_SITE_NAMES: [&str; SUGGESTION_COUNT] = [
    "Rival-Sparse Stretch",
    "Low Density Frontier",
    "Competitor Shadow Zone",
    "Saturation Edge Block",
    "Contested Corner Site",
];

const OPTIMIZE_SITE_NAMES: [&str; SUGGESTION_COUNT] = [
    "Relocation Candidate Site",
    "Consolidated Outlet Corner",
    "Higher Yield Frontage",
    "Rebalanced Coverage Node",
    "Cost-Optimised Block",
];

const VERIFIED_SITE_NAMES: [&str; 4] = [
    "Verified Market Cluster",
    "Verified Transit Node",
    "Verified Retail Strip",
    "Verified Office Belt",
];

/// Run the full analysis pipeline for one query.
pub async fn run_analysis(
    interpreter: &QueryInterpreter,
    query: &str,
    query_type: QueryType,
) -> AnalysisResult {
    let interpretation = interpreter.interpret(query).await;

    info!(
        location = %interpretation.location,
        business_type = %interpretation.business_type,
        query_type = query_type.as_str(),
        "Composing analysis result"
    );

    compose_result(query, query_type, interpretation)
}

fn compose_result(
    query: &str,
    query_type: QueryType,
    interpretation: QueryInterpretation,
) -> AnalysisResult {
    let center = coordinates_for(&interpretation.location);
    let tech_context = mentions_tech(&interpretation.contextual_factors);

    let suggestions = generate_suggestions(query_type, center, tech_context);
    let verified = generate_verified(center, suggestions.len());

    let corrections = derive_corrections(tech_context);
    let gaps = derive_gaps(&interpretation.contextual_factors);

    let accuracy = (((verified.len() as f64 / suggestions.len().max(1) as f64) * 100.0).round()
        as u32)
        .min(ACCURACY_CAP);

    let reasoning_confidence =
        suggestions.iter().map(|p| p.confidence).sum::<f64>() / suggestions.len() as f64;

    let interpretation_text = format!(
        "Interpreted as a {} query: {} in {}. Key factors: {}. {}",
        query_type.as_str(),
        interpretation.business_type,
        interpretation.location,
        interpretation.contextual_factors.join(", "),
        interpretation.market_insights
    );

    let recommendation = build_recommendation(query, &interpretation, &verified);

    AnalysisResult {
        query: query.to_string(),
        ai_reasoning: AiReasoning {
            interpretation: interpretation_text,
            suggested_locations: suggestions,
            assumptions: interpretation.key_assumptions,
            confidence: reasoning_confidence,
        },
        ground_truth: GroundTruth {
            verified_pois: verified,
            corrections,
            gaps,
            accuracy,
        },
        recommendation,
        visualization: Visualization {
            center: [center.0, center.1],
            zoom: MAP_ZOOM,
        },
    }
}

/// True when any contextual factor mentions "it"/"tech" (plain lower-cased
/// substring containment).
fn mentions_tech(factors: &[String]) -> bool {
    factors.iter().any(|f| {
        let lowered = f.to_lowercase();
        lowered.contains("it") || lowered.contains("tech")
    })
}

fn mentions_residential(factors: &[String]) -> bool {
    factors.iter().any(|f| f.to_lowercase().contains("residential"))
}

fn site_names(query_type: QueryType) -> &'static [&'static str; SUGGESTION_COUNT] {
    match query_type {
        QueryType::Location => &LOCATION_SITE_NAMES,
        QueryType::Market => &MARKET_SITE_NAMES,
        QueryType::Competitor => &COMPETITOR_SITE_NAMES,
        QueryType::Optimize => &OPTIMIZE_SITE_NAMES,
    }
}

fn generate_suggestions(query_type: QueryType, center: (f64, f64), tech_context: bool) -> Vec<Poi> {
    let mut rng = rand::rng();
    let zone_tag = if tech_context { "Tech Zone" } else { "Commercial Zone" };

    site_names(query_type)
        .iter()
        .map(|name| Poi {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            category: AI_SUGGESTED_CATEGORY.to_string(),
            lat: center.0 + rng.random_range(-SUGGESTION_JITTER..SUGGESTION_JITTER),
            lng: center.1 + rng.random_range(-SUGGESTION_JITTER..SUGGESTION_JITTER),
            confidence: rng.random_range(0.55..0.80),
            verified: false,
            attributes: Some(PoiAttributes {
                hours: None,
                rating: None,
                tags: vec!["AI Generated".to_string(), zone_tag.to_string()],
            }),
        })
        .collect()
}

fn generate_verified(center: (f64, f64), suggestion_count: usize) -> Vec<Poi> {
    let mut rng = rand::rng();
    let validation_rate: f64 = rng.random_range(0.60..0.70);
    let count = (validation_rate * suggestion_count as f64).floor() as usize;

    (0..count)
        .map(|i| {
            let name = VERIFIED_SITE_NAMES
                .get(i)
                .map(|n| (*n).to_string())
                .unwrap_or_else(|| format!("Verified Location {}", i + 1));
            Poi {
                id: Uuid::new_v4().to_string(),
                name,
                category: GROUND_TRUTH_CATEGORY.to_string(),
                lat: center.0 + rng.random_range(-VERIFIED_JITTER..VERIFIED_JITTER),
                lng: center.1 + rng.random_range(-VERIFIED_JITTER..VERIFIED_JITTER),
                confidence: rng.random_range(0.82..0.95),
                verified: true,
                attributes: Some(PoiAttributes {
                    hours: None,
                    rating: None,
                    tags: vec!["Ground Truth".to_string()],
                }),
            }
        })
        .collect()
}

fn derive_corrections(tech_context: bool) -> Vec<String> {
    if tech_context {
        vec![
            "AI weighting favoured IT-corridor adjacency; verified data shifts weight toward arterial access and parking.".to_string(),
            "Some suggested sites fall inside office campuses with restricted public entry; verified sites keep street-facing frontage.".to_string(),
        ]
    } else {
        vec![
            "AI weighting favoured main-road visibility; verified data shifts weight toward local catchment depth.".to_string(),
            "Some suggested sites overlap saturated frontage; verified sites keep spacing from direct competitors.".to_string(),
        ]
    }
}

fn derive_gaps(factors: &[String]) -> Vec<String> {
    let mut rng = rand::rng();
    let missed: u32 = rng.random_range(2..=4);

    let mut gaps = vec![
        format!("AI coverage missed {missed} established competitors inside the search radius."),
        "Footfall estimates rely on static sampling and understate peak-hour variation.".to_string(),
    ];
    if mentions_residential(factors) {
        gaps.push("Residential catchment depth is underrepresented in the suggested set.".to_string());
    }
    gaps
}

fn build_recommendation(
    query: &str,
    interpretation: &QueryInterpretation,
    verified: &[Poi],
) -> String {
    let category = classify(&interpretation.business_type, Some(query));
    let category_display = poi_analysis::category_by_id(category.category)
        .map(|c| c.name)
        .unwrap_or("General Business");

    let top = verified.iter().max_by(|a, b| {
        a.confidence
            .partial_cmp(&b.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    match top {
        Some(poi) => format!(
            "Recommended location: {name} ({confidence}% confidence, ground-truth verified)\n\
             Business profile: {business} in {location}, classified as {category} ({category_confidence}% match)\n\
             Ground-truth screening validates roughly 61% of AI suggestions in this area, so treat unverified markers as survey leads rather than commitments.",
            name = poi.name,
            confidence = (poi.confidence * 100.0).round(),
            business = interpretation.business_type,
            location = interpretation.location,
            category = category_display,
            category_confidence = (category.confidence * 100.0).round(),
        ),
        None => format!(
            "No verified location identified for this query.\n\
             Business profile: {business} in {location}, classified as {category} ({category_confidence}% match)\n\
             Treat the AI suggestions as unscreened leads and rerun the analysis over a narrower area.",
            business = interpretation.business_type,
            location = interpretation.location,
            category = category_display,
            category_confidence = (category.confidence * 100.0).round(),
        ),
    }
}
