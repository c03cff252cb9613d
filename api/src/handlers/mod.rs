//! API Handlers Module
//!
//! Request handlers for the Project Intelligence API. The summarize handler
//! is the pipeline's error boundary: every internal failure is flattened
//! into a `{"error": <message>}` payload inside a 200 response, while the
//! distinguished internal kind is logged before flattening.

use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use project_intel_core::pipeline::{run_summarization, PipelineError};
use project_intel_core::{ContextSource, Invoker};

use crate::models::{SummaryRequest, SummaryResponse};

/// Shared state of the API server
pub struct ApiState {
    /// Configured model backend
    pub invoker: Invoker,
    /// Configured context provider
    pub context: ContextSource,
}

/// Handler-level unexpected failure: maps to 500 with a `detail` payload.
///
/// Pipeline failures never take this path; they are flattened into the
/// 200 payload instead.
#[derive(Debug)]
pub struct ApiError(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0 })),
        )
            .into_response()
    }
}

/// Build the application router.
///
/// CORS is wide open for frontend integration; tighten before exposing
/// this service publicly.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/summarize", post(summarize))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint providing API information
#[debug_handler]
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Project Intelligence API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "summarize": "POST /summarize"
        }
    }))
}

/// Generate a project summary from analytics data.
///
/// Runs the full pipeline (context fetch → prompt → model → sanitize →
/// validate) and echoes the optional `project_id`.
#[debug_handler]
pub async fn summarize(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    tracing::debug!(project_id = ?request.project_id, "summarize request");

    let summary = match run_summarization(&state.invoker, &state.context).await {
        Ok(report) => serde_json::to_value(report)
            .map_err(|e| ApiError(format!("Failed to generate summary: {}", e)))?,
        Err(e) => {
            match &e {
                PipelineError::Invocation(cause) => {
                    tracing::error!(kind = "invocation", error = %cause, "pipeline failed")
                }
                PipelineError::Parse(cause) => {
                    tracing::error!(kind = "parse", error = %cause, "pipeline failed")
                }
            }
            json!({ "error": format!("Failed to generate summary: {}", e) })
        }
    };

    Ok(Json(SummaryResponse {
        project_id: request.project_id,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use project_intel_core::llm::StubInvoker;

    fn state_with(invoker: Invoker) -> Arc<ApiState> {
        Arc::new(ApiState {
            invoker,
            context: ContextSource::Mock,
        })
    }

    #[tokio::test]
    async fn test_service_info_lists_summarize_endpoint() {
        let Json(body) = service_info().await;
        assert_eq!(body["endpoints"]["summarize"], "POST /summarize");
    }

    #[tokio::test]
    async fn test_summarize_echoes_project_id() {
        let state = state_with(Invoker::Stub(StubInvoker::new()));
        let request = SummaryRequest {
            project_id: Some(42),
        };

        let Json(response) = summarize(State(state), Json(request)).await.unwrap();
        assert_eq!(response.project_id, Some(42));
        assert_eq!(response.summary["project_name"], "Project Alpha");
    }

    #[tokio::test]
    async fn test_summarize_flattens_pipeline_failure() {
        let state = state_with(Invoker::Stub(StubInvoker::with_response(
            "not json at all".to_string(),
        )));
        let request = SummaryRequest { project_id: None };

        let Json(response) = summarize(State(state), Json(request)).await.unwrap();
        assert_eq!(response.project_id, None);
        assert!(response.summary["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to generate summary"));
    }
}
