//! Live dashboard fetcher
//!
//! Issues one GET per (sentiment × category) pair, nine in total, against
//! the Close Loop Analytics dashboard and merges the results by label.
//!
//! Partial-success policy: a network error, non-success status, or malformed
//! body is captured as `ContextRecord::Error` scoped to that single label.
//! The aggregate snapshot is always returned.

use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::context::{ContextRecord, DashboardContext, CATEGORIES, SENTIMENTS};

/// Per-sub-query timeout for the dashboard API
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Path suffix for each category
fn endpoint_for(category: &str) -> &'static str {
    match category {
        "Analytics" => "analytics",
        "Top Reasons" => "top_reasons",
        _ => "top_action_taker",
    }
}

/// Outcome of one sub-query: status code and body, or a transport error
pub type FetchOutcome = Result<(u16, String), String>;

/// Sub-query transport: live HTTP, or canned outcomes keyed by label
#[derive(Debug, Clone)]
enum FetchTransport {
    Real(reqwest::Client),
    Fake(BTreeMap<String, FetchOutcome>),
}

/// HTTP client for the Close Loop Analytics dashboard
#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: String,
    transport: FetchTransport,
}

impl DashboardClient {
    pub fn new(base_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            base_url,
            transport: FetchTransport::Real(client),
        })
    }

    /// Create a client that serves canned outcomes instead of HTTP (for testing)
    pub fn with_outcomes(outcomes: BTreeMap<String, FetchOutcome>) -> Self {
        Self {
            base_url: String::new(),
            transport: FetchTransport::Fake(outcomes),
        }
    }

    /// Fetch all nine labels concurrently.
    ///
    /// Each sub-query writes to its own disjoint label, so the tasks share
    /// no mutable state and need no locking.
    pub async fn fetch(&self) -> DashboardContext {
        let mut tasks = Vec::with_capacity(SENTIMENTS.len() * CATEGORIES.len());
        for sentiment in SENTIMENTS {
            for category in CATEGORIES {
                tasks.push(self.fetch_label(category, sentiment));
            }
        }

        let mut ctx = DashboardContext::default();
        for (label, record) in join_all(tasks).await {
            if let ContextRecord::Error { error } = &record {
                warn!(label = %label, error = %error, "dashboard sub-query degraded");
            }
            ctx.insert(label, record);
        }
        ctx
    }

    async fn fetch_label(&self, category: &str, sentiment: &str) -> (String, ContextRecord) {
        let label = DashboardContext::label(category, sentiment);

        let outcome = match &self.transport {
            FetchTransport::Real(client) => {
                let url = format!(
                    "{}/{}",
                    self.base_url.trim_end_matches('/'),
                    endpoint_for(category)
                );
                debug!(label = %label, url = %url, "fetching dashboard label");
                request_outcome(client, &url, sentiment).await
            }
            FetchTransport::Fake(outcomes) => outcomes
                .get(&label)
                .cloned()
                .unwrap_or_else(|| Err(format!("no fixture for {}", label))),
        };

        let record = label_record(category, outcome);
        (label, record)
    }
}

async fn request_outcome(client: &reqwest::Client, url: &str, sentiment: &str) -> FetchOutcome {
    let response = client
        .get(url)
        .query(&[("response_type", sentiment.to_lowercase())])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| e.to_string())?;
    Ok((status, body))
}

/// Map one sub-query outcome to its label's record.
///
/// All three degradation arms land here: transport error, non-success
/// status, and malformed body (via `parse_record`).
fn label_record(category: &str, outcome: FetchOutcome) -> ContextRecord {
    match outcome {
        Err(error) => ContextRecord::Error { error },
        Ok((status, _)) if !(200..300).contains(&status) => ContextRecord::Error {
            error: format!("API Error: {}", status),
        },
        Ok((_, body)) => parse_record(category, &body),
    }
}

/// Parse one sub-query body into the record shape its category expects.
fn parse_record(category: &str, body: &str) -> ContextRecord {
    let parsed = match category {
        "Analytics" => serde_json::from_str(body).map(ContextRecord::Analytics),
        "Top Reasons" => serde_json::from_str(body).map(ContextRecord::Reasons),
        _ => serde_json::from_str(body).map(ContextRecord::ActionTakers),
    };
    parsed.unwrap_or_else(|_| ContextRecord::Error {
        error: "Invalid JSON response".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AnalyticsRecord;

    #[test]
    fn test_parse_record_analytics() {
        let body = r#"{"total_responses": 85, "acted_on": 5}"#;
        assert_eq!(
            parse_record("Analytics", body),
            ContextRecord::Analytics(AnalyticsRecord {
                total_responses: 85,
                acted_on: 5,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_parse_record_malformed_body_degrades() {
        let record = parse_record("Analytics", "<html>nope</html>");
        assert_eq!(
            record,
            ContextRecord::Error {
                error: "Invalid JSON response".to_string()
            }
        );
    }

    #[test]
    fn test_parse_record_reasons() {
        let body = r#"[{"reason": "Other", "acted_on": 5, "id": "1"}]"#;
        match parse_record("Top Reasons", body) {
            ContextRecord::Reasons(reasons) => {
                assert_eq!(reasons.len(), 1);
                assert_eq!(reasons[0].reason, "Other");
            }
            other => panic!("expected reasons record, got {:?}", other),
        }
    }

    #[test]
    fn test_label_record_network_error_degrades() {
        let record = label_record("Analytics", Err("connection refused".to_string()));
        assert_eq!(
            record,
            ContextRecord::Error {
                error: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn test_label_record_bad_status_degrades() {
        let record = label_record("Analytics", Ok((503, "unavailable".to_string())));
        assert_eq!(
            record,
            ContextRecord::Error {
                error: "API Error: 503".to_string()
            }
        );
    }

    #[test]
    fn test_label_record_success_parses_body() {
        let body = r#"{"total_responses": 10, "acted_on": 3}"#.to_string();
        match label_record("Analytics", Ok((200, body))) {
            ContextRecord::Analytics(rec) => {
                assert_eq!(rec.total_responses, 10);
                assert_eq!(rec.acted_on, 3);
            }
            other => panic!("expected analytics record, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_aggregates_partial_success_across_nine_labels() {
        let mut outcomes = BTreeMap::new();
        outcomes.insert(
            DashboardContext::label("Analytics", "Positive"),
            Ok((200, r#"{"total_responses": 85, "acted_on": 5}"#.to_string())),
        );
        outcomes.insert(
            DashboardContext::label("Top Reasons", "Positive"),
            Err("connection refused".to_string()),
        );
        outcomes.insert(
            DashboardContext::label("Analytics", "Negative"),
            Ok((500, "boom".to_string())),
        );
        outcomes.insert(
            DashboardContext::label("Top Action Takers", "Negative"),
            Ok((200, "<html>nope</html>".to_string())),
        );

        let client = DashboardClient::with_outcomes(outcomes);
        let ctx = client.fetch().await;

        // Aggregate always comes back whole: nine labels, errors included
        assert_eq!(ctx.len(), 9);

        match ctx.get("Analytics", "Positive") {
            ContextRecord::Analytics(rec) => assert_eq!(rec.total_responses, 85),
            other => panic!("expected analytics record, got {:?}", other),
        }
        assert_eq!(
            ctx.get("Top Reasons", "Positive"),
            ContextRecord::Error {
                error: "connection refused".to_string()
            }
        );
        assert_eq!(
            ctx.get("Analytics", "Negative"),
            ContextRecord::Error {
                error: "API Error: 500".to_string()
            }
        );
        assert_eq!(
            ctx.get("Top Action Takers", "Negative"),
            ContextRecord::Error {
                error: "Invalid JSON response".to_string()
            }
        );
    }

    #[test]
    fn test_endpoint_mapping() {
        assert_eq!(endpoint_for("Analytics"), "analytics");
        assert_eq!(endpoint_for("Top Reasons"), "top_reasons");
        assert_eq!(endpoint_for("Top Action Takers"), "top_action_taker");
    }
}
