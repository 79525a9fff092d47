//! SQL injection classification
//!
//! Compares the `userId` query value against a short list of canonical
//! injection strings. Matching is exact and case-sensitive: only the listed
//! literals are rejected, so near variants reach the edge WAF untouched.

use once_cell::sync::Lazy;

use super::{AttackCategory, MatchRule, PatternSet, Verdict};

/// Canonical SQL injection inputs
static SQL_INJECTION_INPUTS: &[&str] = &[
    "1' OR '1'='1",
    "1; DROP TABLE users--",
    "1' UNION SELECT * FROM users--",
    "admin'--",
    "1' OR 1=1#",
];

pub static SQL_INJECTION_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::SqlInjection,
        MatchRule::Exact,
        SQL_INJECTION_INPUTS,
    )
});

/// Classify a user id as it arrived in the query string.
pub fn classify_user_id(user_id: &str) -> Verdict {
    SQL_INJECTION_PATTERNS.evaluate(user_id)
}
