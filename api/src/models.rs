//! API request/response models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Reported service version
    pub version: String,
}

/// Body of `POST /summarize`
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    /// Optional project identifier, echoed back in the response
    #[serde(default)]
    pub project_id: Option<i64>,
}

/// Response of `POST /summarize`
///
/// `summary` is either a Summary Report object or `{"error": <message>}`
/// when the pipeline failed internally.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub project_id: Option<i64>,
    pub summary: Value,
}
