use serde::{Deserialize, Serialize};

/// A point of interest generated for one analysis response.
///
/// Ids are fresh per generation call; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
    pub confidence: f64,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<PoiAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub tags: Vec<String>,
}

/// Structured interpretation of a free-text query.
///
/// Field names double as the strict JSON schema the LLM is instructed to
/// return, so a successful chat-completion response deserializes directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInterpretation {
    pub location: String,
    pub business_type: String,
    pub contextual_factors: Vec<String>,
    pub market_insights: String,
    pub key_assumptions: Vec<String>,
}

/// The externally observable analysis artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub query: String,
    pub ai_reasoning: AiReasoning,
    pub ground_truth: GroundTruth,
    pub recommendation: String,
    pub visualization: Visualization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReasoning {
    pub interpretation: String,
    pub suggested_locations: Vec<Poi>,
    pub assumptions: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundTruth {
    #[serde(rename = "verifiedPOIs")]
    pub verified_pois: Vec<Poi>,
    pub corrections: Vec<String>,
    pub gaps: Vec<String>,
    pub accuracy: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visualization {
    /// [lat, lng]
    pub center: [f64; 2],
    pub zoom: u32,
}

/// Supported analysis flavours; anything unrecognized falls back to Location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Location,
    Market,
    Competitor,
    Optimize,
}

impl QueryType {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("market") => QueryType::Market,
            Some("competitor") => QueryType::Competitor,
            Some("optimize") => QueryType::Optimize,
            _ => QueryType::Location,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Location => "location",
            QueryType::Market => "market",
            QueryType::Competitor => "competitor",
            QueryType::Optimize => "optimize",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub llm_connected: bool,
    pub mode: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TestLlmResponse {
    pub connected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_type_parsing_falls_back_to_location() {
        assert_eq!(QueryType::parse(Some("market")), QueryType::Market);
        assert_eq!(QueryType::parse(Some("COMPETITOR")), QueryType::Competitor);
        assert_eq!(QueryType::parse(Some("optimize")), QueryType::Optimize);
        assert_eq!(QueryType::parse(Some("bogus")), QueryType::Location);
        assert_eq!(QueryType::parse(None), QueryType::Location);
    }

    #[test]
    fn analysis_result_uses_camel_case_wire_names() {
        let result = AnalysisResult {
            query: "q".into(),
            ai_reasoning: AiReasoning {
                interpretation: "i".into(),
                suggested_locations: vec![],
                assumptions: vec![],
                confidence: 0.7,
            },
            ground_truth: GroundTruth {
                verified_pois: vec![],
                corrections: vec![],
                gaps: vec![],
                accuracy: 60,
            },
            recommendation: "r".into(),
            visualization: Visualization {
                center: [12.9716, 77.5946],
                zoom: 13,
            },
        };

        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("aiReasoning").is_some());
        assert!(value["aiReasoning"].get("suggestedLocations").is_some());
        assert!(value["groundTruth"].get("verifiedPOIs").is_some());
        assert!(value["groundTruth"].get("accuracy").is_some());
    }

    #[test]
    fn interpretation_parses_llm_wire_format() {
        let json = r#"{
            "location": "Pune",
            "businessType": "Cafe",
            "contextualFactors": ["Commercial District Activity"],
            "marketInsights": "steady demand",
            "keyAssumptions": ["stable rents"]
        }"#;
        let parsed: QueryInterpretation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.location, "Pune");
        assert_eq!(parsed.business_type, "Cafe");
        assert_eq!(parsed.contextual_factors.len(), 1);
    }
}
