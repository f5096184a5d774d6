//! LLM query interpreter with a deterministic heuristic fallback.
//!
//! In LLM mode a single chat-completion call is made against the configured
//! OpenAI-compatible endpoint. Any failure on that path is absorbed and the
//! heuristic extractor produces the interpretation instead, so `interpret`
//! itself never fails.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::LlmConfig;
use crate::models::QueryInterpretation;

/// Timeout for the interpretation chat-completion call.
const CHAT_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for connectivity probes.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const INTERPRETER_SYSTEM_PROMPT: &str = r#"You are a business-location analyst for small retail and service businesses in Indian and African cities.

Interpret the user's query and respond with ONLY strict JSON, no markdown, no commentary, in exactly this shape:
{
  "location": "city name",
  "businessType": "short business label",
  "contextualFactors": ["short situational tags"],
  "marketInsights": "one paragraph on local demand and competition",
  "keyAssumptions": ["explicit assumptions behind the analysis"]
}"#;

/// Failure modes of the LLM call path. Logged and absorbed, never surfaced.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("chat completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat endpoint returned status {0}")]
    BadStatus(reqwest::StatusCode),
    #[error("chat response contained no content")]
    EmptyResponse,
    #[error("chat response was not valid interpretation JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

pub struct QueryInterpreter {
    config: LlmConfig,
    client: Client,
}

impl QueryInterpreter {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Interpret a free-text query. Infallible: LLM failures degrade to the
    /// heuristic extractor.
    pub async fn interpret(&self, query: &str) -> QueryInterpretation {
        if self.config.llm_mode() {
            match self.interpret_with_llm(query).await {
                Ok(interpretation) => {
                    info!(
                        location = %interpretation.location,
                        business_type = %interpretation.business_type,
                        "LLM interpretation succeeded"
                    );
                    return interpretation;
                }
                Err(e) => {
                    warn!(error = %e, "LLM interpretation failed, falling back to heuristics");
                }
            }
        }
        heuristic_interpret(query)
    }

    async fn interpret_with_llm(&self, query: &str) -> Result<QueryInterpretation, InterpreterError> {
        let url = chat_completions_url(&self.config.endpoint);
        let payload = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": INTERPRETER_SYSTEM_PROMPT },
                { "role": "user", "content": query }
            ],
            "temperature": 0.2
        });

        let mut request = self.client.post(&url).json(&payload).timeout(CHAT_TIMEOUT);
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(InterpreterError::BadStatus(response.status()));
        }

        let body: Value = response.json().await?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .filter(|c| !c.trim().is_empty())
            .ok_or(InterpreterError::EmptyResponse)?;

        let interpretation = serde_json::from_str(strip_code_fences(content))?;
        Ok(interpretation)
    }

    /// Probe the configured endpoint with a minimal chat call. Heuristic mode
    /// always reports false without touching the network.
    pub async fn test_connection(&self) -> bool {
        if !self.config.llm_mode() {
            return false;
        }

        let url = chat_completions_url(&self.config.endpoint);
        let payload = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": "ping" }],
            "max_tokens": 1
        });

        let mut request = self.client.post(&url).json(&payload).timeout(PROBE_TIMEOUT);
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "LLM connectivity probe failed");
                false
            }
        }
    }
}

/// Probe an arbitrary endpoint/model pair (serves the test-llm handler).
///
/// Tries a model-listing GET first; if that fails for any reason, one
/// chat-completion POST. Errors are absorbed into `false`.
pub async fn probe_endpoint(client: &Client, endpoint: &str, model: &str) -> bool {
    let models_url = format!("{}/models", endpoint.trim_end_matches('/'));
    match client.get(&models_url).timeout(PROBE_TIMEOUT).send().await {
        Ok(response) if response.status().is_success() => return true,
        Ok(response) => {
            warn!(status = %response.status(), "Model listing probe rejected");
        }
        Err(e) => {
            warn!(error = %e, "Model listing probe failed");
        }
    }

    let payload = json!({
        "model": model,
        "messages": [{ "role": "user", "content": "ping" }],
        "max_tokens": 1
    });
    match client
        .post(chat_completions_url(endpoint))
        .json(&payload)
        .timeout(PROBE_TIMEOUT)
        .send()
        .await
    {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            warn!(error = %e, "Chat completion probe failed");
            false
        }
    }
}

fn chat_completions_url(endpoint: &str) -> String {
    format!("{}/chat/completions", endpoint.trim_end_matches('/'))
}

/// Strip optional Markdown code fences (with an optional "json" tag) from an
/// LLM response before parsing.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Ordered city scan list: first substring match wins.
const CITY_SCAN: &[(&str, &str)] = &[
    ("bangalore", "Bangalore"),
    ("bengaluru", "Bangalore"),
    ("mumbai", "Mumbai"),
    ("delhi", "Delhi"),
    ("hyderabad", "Hyderabad"),
    ("chennai", "Chennai"),
    ("pune", "Pune"),
    ("kolkata", "Kolkata"),
    ("ahmedabad", "Ahmedabad"),
    ("jaipur", "Jaipur"),
    ("kochi", "Kochi"),
    ("nairobi", "Nairobi"),
    ("lagos", "Lagos"),
    ("accra", "Accra"),
    ("kampala", "Kampala"),
    ("kigali", "Kigali"),
];

/// Ordered keyword → business-type table: first substring match wins.
const BUSINESS_TYPES: &[(&str, &str)] = &[
    ("chai", "Chai Stall"),
    ("tea", "Tea Shop"),
    ("coffee", "Coffee Shop"),
    ("cafe", "Cafe"),
    ("restaurant", "Restaurant"),
    ("bakery", "Bakery"),
    ("pharmacy", "Pharmacy"),
    ("chemist", "Pharmacy"),
    ("gym", "Gym"),
    ("fitness", "Fitness Studio"),
    ("kirana", "Kirana Store"),
    ("grocery", "Grocery Store"),
    ("supermarket", "Supermarket"),
    ("salon", "Salon"),
    ("clinic", "Clinic"),
    ("electronics", "Electronics Store"),
    ("mobile", "Mobile Shop"),
    ("coaching", "Coaching Centre"),
    ("bookstore", "Bookstore"),
];

const DEFAULT_BUSINESS_TYPE: &str = "Business";
const DEFAULT_LOCATION: &str = "Bangalore";

/// Deterministic interpretation used when no LLM is configured or reachable.
pub fn heuristic_interpret(query: &str) -> QueryInterpretation {
    let lowered = query.to_lowercase();

    let location = CITY_SCAN
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, display)| display.to_string())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    let business_type = BUSINESS_TYPES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| DEFAULT_BUSINESS_TYPE.to_string());

    let mut contextual_factors = Vec::new();
    if lowered.contains("it park") || lowered.contains("tech park") {
        contextual_factors.push("Proximity to IT/Tech Parks".to_string());
    }
    if lowered.contains("residential") {
        contextual_factors.push("Residential Catchment Demand".to_string());
    }
    if lowered.contains("underserved") || lowered.contains("gap") {
        contextual_factors.push("Underserved Market Segment".to_string());
    }
    if lowered.contains("commercial") {
        contextual_factors.push("Commercial District Demand".to_string());
    }
    if lowered.contains("metro") || lowered.contains("transit") {
        contextual_factors.push("Near Metro/Transport Hubs".to_string());
    }
    if contextual_factors.is_empty() {
        contextual_factors.push("General Urban Demand".to_string());
        contextual_factors.push("Steady Local Footfall".to_string());
    }

    let factors_joined = contextual_factors.join(", ");
    let market_insights = format!(
        "{business_type} demand in {location} is shaped by {factors_joined}. \
         Corridors with steady daytime footfall show the strongest fit, while rents \
         between prime and secondary streets vary widely."
    );

    let key_assumptions = vec![
        format!("Footfall near shortlisted sites follows typical {location} weekday patterns"),
        format!("Rental costs for a {business_type} stay within the current market band"),
        "Nearby competitors continue operating at present capacity".to_string(),
        format!("Contextual factors ({factors_joined}) remain stable over the next 12 months"),
    ];

    QueryInterpretation {
        location,
        business_type,
        contextual_factors,
        market_insights,
        key_assumptions,
    }
}
