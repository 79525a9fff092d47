//! XSS (Cross-Site Scripting) classification
//!
//! Looks for canonical script payloads anywhere in a comment, ignoring case.

use once_cell::sync::Lazy;

use super::{AttackCategory, MatchRule, PatternSet, Verdict};

/// XSS payload fragments
static XSS_FRAGMENTS: &[&str] = &[
    "<script>alert('XSS')</script>",
    "<img src=x onerror=alert('XSS')>",
    "javascript:alert('XSS')",
    "<svg onload=alert('XSS')>",
    "'><script>alert('XSS')</script>",
];

pub static XSS_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::Xss,
        MatchRule::ContainsIgnoreCase,
        XSS_FRAGMENTS,
    )
});

/// Classify a comment that would be rendered into a page.
pub fn classify_comment_markup(comment: &str) -> Verdict {
    XSS_PATTERNS.evaluate(comment)
}
