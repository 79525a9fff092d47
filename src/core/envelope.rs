//! The response body every test endpoint returns.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Coarse classification of a response, stable for tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// The request went through (possibly annotated)
    Allowed,
    /// The application itself rejected the input
    Rejected,
    /// The endpoint only reports what it observed
    Informational,
}

/// Status text used whenever the application rejects input itself.
pub const BLOCKED_STATUS: &str = "Blocked by application logic";

/// Status text for unsafe operations the edge WAF is expected to stop.
pub const WAF_EXPECTED_STATUS: &str = "This should be blocked by WAF";

/// Structured verdict plus echoed input.
///
/// Endpoint-specific fields (`userId`, `comment`, `matchedPatterns`, ...)
/// are flattened into the top-level JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub message: String,
    pub status: String,
    pub outcome: Outcome,
    #[serde(flatten)]
    pub data: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl ResponseEnvelope {
    pub fn new(message: impl Into<String>, status: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            message: message.into(),
            status: status.into(),
            outcome,
            data: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach an endpoint-specific field.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}
