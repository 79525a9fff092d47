//! Malicious payload classification
//!
//! Searches a JSON body for script and DOM API tokens, ignoring case. The
//! endpoint inspects the body text as received, so escaped characters stay
//! escaped; a parsed value without its source text is serialized compactly.

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{AttackCategory, MatchRule, PatternSet, Verdict};

/// Script execution and DOM access tokens
static PAYLOAD_TOKENS: &[&str] = &[
    "eval(",
    "document.cookie",
    "window.location",
    "base64",
    "fromCharCode",
    "innerHTML",
    "outerHTML",
];

pub static PAYLOAD_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::MaliciousPayload,
        MatchRule::ContainsIgnoreCase,
        PAYLOAD_TOKENS,
    )
});

/// Text form of a payload as the classifier sees it.
///
/// `Value::Null` (absent or unparsable body) reads as empty.
pub fn payload_text(payload: &Value) -> String {
    match payload {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Classify a request body as received.
pub fn classify_body_text(body: &str) -> Verdict {
    PAYLOAD_PATTERNS.evaluate(body)
}

/// Classify a structured request body.
pub fn classify_payload(payload: &Value) -> Verdict {
    PAYLOAD_PATTERNS.evaluate(&payload_text(payload))
}
