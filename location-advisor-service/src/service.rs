use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::analysis;
use crate::interpreter::{self, QueryInterpreter};
use crate::models::{AnalysisResult, QueryType, StatusResponse, TestLlmResponse};

type ApiResult<T> = Result<Json<T>, ApiError>;
type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub interpreter: Arc<QueryInterpreter>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        .route("/status", get(status))
        .route("/test-llm", post(test_llm))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Location Advisor Service",
        "version": "1.0.0",
        "description": "AI-assisted business-location suggestions with ground-truth screening",
        "endpoints": {
            "POST /analyze": "Run a location analysis for a free-text query",
            "GET /status": "LLM connectivity status",
            "POST /test-llm": "Probe an OpenAI-compatible endpoint",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<AnalysisResult> {
    // Validate before orchestration: query must be present and a string.
    let query = match body.get("query").and_then(Value::as_str) {
        Some(query) => query.to_string(),
        None => return Err(bad_request_error("query is required and must be a string")),
    };
    let query_type = QueryType::parse(body.get("queryType").and_then(Value::as_str));

    info!(
        query_type = query_type.as_str(),
        query_length = query.len(),
        "Processing analyze request"
    );

    // The pipeline itself is infallible; a panic inside it is the only
    // unexpected failure, isolated here and mapped to a 500 envelope.
    let interpreter = state.interpreter.clone();
    let result = tokio::spawn(async move {
        analysis::run_analysis(&interpreter, &query, query_type).await
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Analysis pipeline failed");
        internal_error("Analysis failed unexpectedly", &e.to_string())
    })?;

    Ok(Json(result))
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let connected = state.interpreter.test_connection().await;
    Json(StatusResponse {
        llm_connected: connected,
        mode: if connected { "llm" } else { "simulation" },
    })
}

async fn test_llm(State(_state): State<AppState>, Json(body): Json<Value>) -> Json<TestLlmResponse> {
    let endpoint = body.get("endpoint").and_then(Value::as_str);
    let model = body.get("model").and_then(Value::as_str);

    let connected = match (endpoint, model) {
        (Some(endpoint), Some(model)) => {
            info!(endpoint = %endpoint, model = %model, "Probing LLM endpoint");
            interpreter::probe_endpoint(&reqwest::Client::new(), endpoint, model).await
        }
        _ => {
            warn!("test-llm request missing endpoint or model");
            false
        }
    };

    Json(TestLlmResponse { connected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        build_router(AppState {
            interpreter: Arc::new(QueryInterpreter::new(LlmConfig::simulated())),
        })
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn analyze_rejects_empty_body() {
        let response = test_router()
            .oneshot(json_request("POST", "/analyze", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn analyze_rejects_non_string_query() {
        let response = test_router()
            .oneshot(json_request("POST", "/analyze", r#"{"query": 42}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analyze_rejects_get_method() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/analyze")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn analyze_returns_full_result() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/analyze",
                r#"{"query": "Where should I open a chai stall near IT parks in Bangalore?", "queryType": "location"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body["aiReasoning"]["suggestedLocations"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
        assert!(body["groundTruth"]["accuracy"].as_u64().unwrap() <= 70);
        assert_eq!(body["visualization"]["zoom"].as_u64().unwrap(), 13);
        assert!(body["recommendation"].as_str().is_some());
    }

    #[tokio::test]
    async fn status_is_always_ok_in_simulation() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["llmConnected"], json!(false));
        assert_eq!(body["mode"], json!("simulation"));
    }

    #[tokio::test]
    async fn test_llm_degrades_to_not_connected_on_missing_fields() {
        let response = test_router()
            .oneshot(json_request("POST", "/test-llm", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["connected"], json!(false));
    }

    #[tokio::test]
    async fn test_llm_rejects_get_method() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/test-llm")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn health_check_reports_healthy() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], json!("healthy"));
    }
}
