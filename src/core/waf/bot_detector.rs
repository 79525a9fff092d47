//! Bot detection
//!
//! Looks for generic bot tokens in the declared client identity. The result
//! is informational only: the endpoint reports the first token found and
//! never rejects, since real bot management works on behaviour over time.

use once_cell::sync::Lazy;

use super::{AttackCategory, MatchRule, PatternSet, Verdict};

/// Generic bot identity tokens, in reporting priority
static BOT_TOKENS: &[&str] = &["bot", "crawler", "spider", "scraper", "scanner"];

pub static BOT_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::BotSimulation,
        MatchRule::ContainsIgnoreCase,
        BOT_TOKENS,
    )
});

/// Classify a `User-Agent` value.
pub fn classify_user_agent(user_agent: &str) -> Verdict {
    BOT_PATTERNS.evaluate(user_agent)
}

/// The first bot token found in `user_agent`, or an empty string.
pub fn detected_pattern(user_agent: &str) -> &'static str {
    classify_user_agent(user_agent).first_match().unwrap_or("")
}
