//! Dashboard Context
//!
//! The analytics snapshot fed into the prompt. Records are keyed by label
//! `"<Category> (<Sentiment>)"`, nine labels total (3 sentiments × 3
//! categories). The snapshot is built fresh per request and never mutated
//! after construction.

pub mod live;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Settings;

pub use live::DashboardClient;

/// Sentiment partitions, in label order
pub const SENTIMENTS: [&str; 3] = ["Positive", "Negative", "Neutral"];

/// Category facets within each sentiment partition
pub const CATEGORIES: [&str; 3] = ["Analytics", "Top Action Takers", "Top Reasons"];

/// Aggregate response counts for one sentiment bucket.
///
/// Implicit invariant: `acted_on <= total_responses`. The sub-counts default
/// to zero when the upstream payload omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub total_responses: u64,
    pub acted_on: u64,
    #[serde(default)]
    pub resolved_positively: u64,
    #[serde(default)]
    pub not_resolved_positively: u64,
    #[serde(default)]
    pub too_late_to_act: u64,
}

/// One entry in a "Top Action Takers" ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTaker {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "imgUrl", default)]
    pub img_url: String,
    pub acted_on: u64,
}

/// One entry in a "Top Reasons" ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonRecord {
    pub reason: String,
    pub id: String,
    pub acted_on: u64,
}

/// Value stored under one context label.
///
/// `Error` is the per-label degradation value used by the live fetcher: a
/// failed sub-query poisons only its own label, never the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextRecord {
    Analytics(AnalyticsRecord),
    ActionTakers(Vec<ActionTaker>),
    Reasons(Vec<ReasonRecord>),
    Error { error: String },
}

impl ContextRecord {
    /// Empty/zero record for the given category.
    ///
    /// Downstream consumers treat a missing label as this value, never as
    /// an error.
    pub fn empty_for(category: &str) -> Self {
        match category {
            "Analytics" => ContextRecord::Analytics(AnalyticsRecord::default()),
            "Top Reasons" => ContextRecord::Reasons(Vec::new()),
            _ => ContextRecord::ActionTakers(Vec::new()),
        }
    }
}

/// Sentiment × category snapshot of the Close Loop Analytics dashboard.
///
/// Backed by a `BTreeMap` so serialization order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardContext {
    records: BTreeMap<String, ContextRecord>,
}

impl DashboardContext {
    /// Compose the label for one (category, sentiment) pair.
    pub fn label(category: &str, sentiment: &str) -> String {
        format!("{} ({})", category, sentiment)
    }

    /// All nine canonical labels.
    pub fn labels() -> Vec<String> {
        let mut labels = Vec::with_capacity(SENTIMENTS.len() * CATEGORIES.len());
        for sentiment in SENTIMENTS {
            for category in CATEGORIES {
                labels.push(Self::label(category, sentiment));
            }
        }
        labels
    }

    pub fn insert(&mut self, label: String, record: ContextRecord) {
        self.records.insert(label, record);
    }

    /// Look up one label, falling back to the empty record for its category.
    pub fn get(&self, category: &str, sentiment: &str) -> ContextRecord {
        self.records
            .get(&Self::label(category, sentiment))
            .cloned()
            .unwrap_or_else(|| ContextRecord::empty_for(category))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize for prompt substitution.
    pub fn to_json_string(&self) -> String {
        // BTreeMap order makes this deterministic for a given snapshot
        serde_json::to_string_pretty(&self.records).unwrap_or_else(|_| "{}".to_string())
    }

    /// The fixed snapshot used when no dashboard endpoint is configured.
    ///
    /// Positive records carry real-looking data; Negative and Neutral are
    /// zeroed placeholders. Never fails.
    pub fn mock() -> Self {
        let mut ctx = Self::default();

        ctx.insert(
            Self::label("Analytics", "Positive"),
            ContextRecord::Analytics(AnalyticsRecord {
                total_responses: 85,
                acted_on: 5,
                resolved_positively: 4,
                not_resolved_positively: 1,
                too_late_to_act: 0,
            }),
        );
        ctx.insert(
            Self::label("Top Action Takers", "Positive"),
            ContextRecord::ActionTakers(vec![ActionTaker {
                id: "2".to_string(),
                name: "Guest User".to_string(),
                email: "guest@test.org".to_string(),
                img_url: "/rails/active_storage/...".to_string(),
                acted_on: 5,
            }]),
        );
        ctx.insert(
            Self::label("Top Reasons", "Positive"),
            ContextRecord::Reasons(vec![ReasonRecord {
                reason: "Other".to_string(),
                id: "1".to_string(),
                acted_on: 5,
            }]),
        );

        for sentiment in ["Negative", "Neutral"] {
            for category in CATEGORIES {
                ctx.insert(
                    Self::label(category, sentiment),
                    ContextRecord::empty_for(category),
                );
            }
        }

        ctx
    }
}

/// Context provider selector.
///
/// `Mock` is the default; `Live` fans out to the dashboard API. Fetching is
/// infallible either way: the live variant degrades per label.
#[derive(Debug, Clone)]
pub enum ContextSource {
    Mock,
    Live(DashboardClient),
}

impl ContextSource {
    /// Select the provider from settings: a configured dashboard endpoint
    /// enables the live fetcher. Client construction failure is surfaced
    /// at startup, not degraded.
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        Ok(match &settings.dashboard_base_url {
            Some(base_url) => ContextSource::Live(DashboardClient::new(base_url.clone())?),
            None => ContextSource::Mock,
        })
    }

    /// Produce the context snapshot for one request.
    pub async fn fetch(&self) -> DashboardContext {
        match self {
            ContextSource::Mock => DashboardContext::mock(),
            ContextSource::Live(client) => client.fetch().await,
        }
    }
}
