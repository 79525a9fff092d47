//! Path traversal classification
//!
//! Detects canonical directory traversal strings for Unix and Windows
//! separators inside a requested file path, ignoring case.

use once_cell::sync::Lazy;

use super::{AttackCategory, MatchRule, PatternSet, Verdict};

/// Traversal sequences targeting well-known sensitive files
static TRAVERSAL_PATHS: &[&str] = &[
    "../../../etc/passwd",
    "..\\..\\..\\windows\\system32\\config\\sam",
    "../etc/shadow",
    "../../../../boot.ini",
    "../web.config",
];

pub static PATH_TRAVERSAL_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::PathTraversal,
        MatchRule::ContainsIgnoreCase,
        TRAVERSAL_PATHS,
    )
});

/// Classify a file path supplied by the client.
pub fn classify_file_path(file_path: &str) -> Verdict {
    PATH_TRAVERSAL_PATTERNS.evaluate(file_path)
}
