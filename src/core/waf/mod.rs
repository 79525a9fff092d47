//! Pattern classification for the WAF test endpoints.
//!
//! Every attack category owns one fixed, ordered signature table and one
//! classifier function. Classifiers are pure: the verdict depends only on the
//! category and the input, never on earlier requests.
//!
//! Categories fall under one of three policies:
//! - hard-block: a match makes the application itself reject the request
//! - soft-annotate: a match is only reported, the request still succeeds
//! - informational: the endpoint describes what it saw and never rejects

pub mod body_inspector;
pub mod bot_detector;
pub mod business_data;
pub mod command_injection;
pub mod engine;
pub mod path_traversal;
pub mod size_limit;
pub mod sql_injection;
pub mod xss_detector;

use std::fmt;

use axum::http::HeaderMap;
pub use body_inspector::classify_payload;
pub use bot_detector::classify_user_agent;
pub use business_data::{
    classify_comment, classify_person_name, classify_vehicle_brand, is_known_brand,
};
pub use command_injection::classify_command;
pub use engine::classify;
pub use path_traversal::classify_file_path;
pub use size_limit::{OVERSIZE_THRESHOLD, classify_size};
pub use sql_injection::classify_user_id;
pub use xss_detector::classify_comment_markup;

/// The closed set of request classes the fixture knows how to judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackCategory {
    SqlInjection,
    Xss,
    PathTraversal,
    CommandInjection,
    MaliciousPayload,
    BotSimulation,
    OversizedRequest,
    ProtocolAttack,
    PersonRegistration,
    VehicleRegistration,
    CommentSubmission,
}

impl AttackCategory {
    /// Every category, in declaration order.
    pub const ALL: [AttackCategory; 11] = [
        AttackCategory::SqlInjection,
        AttackCategory::Xss,
        AttackCategory::PathTraversal,
        AttackCategory::CommandInjection,
        AttackCategory::MaliciousPayload,
        AttackCategory::BotSimulation,
        AttackCategory::OversizedRequest,
        AttackCategory::ProtocolAttack,
        AttackCategory::PersonRegistration,
        AttackCategory::VehicleRegistration,
        AttackCategory::CommentSubmission,
    ];

    /// What a match means for this category.
    pub fn policy(&self) -> Policy {
        match self {
            AttackCategory::SqlInjection
            | AttackCategory::Xss
            | AttackCategory::PathTraversal
            | AttackCategory::CommandInjection
            | AttackCategory::MaliciousPayload
            | AttackCategory::OversizedRequest => Policy::HardBlock,
            AttackCategory::PersonRegistration
            | AttackCategory::VehicleRegistration
            | AttackCategory::CommentSubmission => Policy::SoftAnnotate,
            AttackCategory::BotSimulation | AttackCategory::ProtocolAttack => {
                Policy::Informational
            }
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackCategory::SqlInjection => "sql_injection",
            AttackCategory::Xss => "xss",
            AttackCategory::PathTraversal => "path_traversal",
            AttackCategory::CommandInjection => "command_injection",
            AttackCategory::MaliciousPayload => "malicious_payload",
            AttackCategory::BotSimulation => "bot_simulation",
            AttackCategory::OversizedRequest => "oversized_request",
            AttackCategory::ProtocolAttack => "protocol_attack",
            AttackCategory::PersonRegistration => "person_registration",
            AttackCategory::VehicleRegistration => "vehicle_registration",
            AttackCategory::CommentSubmission => "comment_submission",
        }
    }
}

impl fmt::Display for AttackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the dispatcher reacts to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Reject the request with a client error
    HardBlock,
    /// Succeed, but flag the match
    SoftAnnotate,
    /// Succeed and describe the request; never rejects
    Informational,
}

/// How a signature is compared against the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Input must equal the signature byte for byte
    Exact,
    /// Signature must occur somewhere in the input, ignoring case
    ContainsIgnoreCase,
}

/// An ordered, immutable signature table bound to one category.
#[derive(Debug)]
pub struct PatternSet {
    category: AttackCategory,
    rule: MatchRule,
    patterns: &'static [&'static str],
    // Lowercased copies for ContainsIgnoreCase, same order as `patterns`.
    folded: Vec<String>,
}

impl PatternSet {
    pub fn new(
        category: AttackCategory,
        rule: MatchRule,
        patterns: &'static [&'static str],
    ) -> Self {
        let folded = match rule {
            MatchRule::Exact => Vec::new(),
            MatchRule::ContainsIgnoreCase => patterns.iter().map(|p| p.to_lowercase()).collect(),
        };
        Self {
            category,
            rule,
            patterns,
            folded,
        }
    }

    pub fn category(&self) -> AttackCategory {
        self.category
    }

    pub fn rule(&self) -> MatchRule {
        self.rule
    }

    pub fn patterns(&self) -> &'static [&'static str] {
        self.patterns
    }

    /// All signatures that match `input`, in declaration order.
    pub fn matches(&self, input: &str) -> Vec<&'static str> {
        match self.rule {
            MatchRule::Exact => self
                .patterns
                .iter()
                .copied()
                .filter(|pattern| *pattern == input)
                .collect(),
            MatchRule::ContainsIgnoreCase => {
                if input.is_empty() {
                    return Vec::new();
                }
                let haystack = input.to_lowercase();
                self.patterns
                    .iter()
                    .zip(&self.folded)
                    .filter(|(_, needle)| haystack.contains(needle.as_str()))
                    .map(|(pattern, _)| *pattern)
                    .collect()
            }
        }
    }

    /// Run the table against `input` and wrap the result as a verdict.
    pub fn evaluate(&self, input: &str) -> Verdict {
        Verdict::from_matches(self.matches(input))
    }
}

/// Outcome of a classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// One or more signatures matched, in declaration order
    Matched(Vec<&'static str>),
    NotMatched,
}

impl Verdict {
    pub fn from_matches(matches: Vec<&'static str>) -> Self {
        if matches.is_empty() {
            Verdict::NotMatched
        } else {
            Verdict::Matched(matches)
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matched(_))
    }

    /// The first matching signature, if any.
    pub fn first_match(&self) -> Option<&'static str> {
        match self {
            Verdict::Matched(patterns) => patterns.first().copied(),
            Verdict::NotMatched => None,
        }
    }

    pub fn matched_patterns(&self) -> &[&'static str] {
        match self {
            Verdict::Matched(patterns) => patterns,
            Verdict::NotMatched => &[],
        }
    }
}

/// The attacker-controllable part of a request.
#[derive(Debug, Clone, Copy)]
pub enum ClassificationInput<'a> {
    Text(&'a str),
    Payload(&'a serde_json::Value),
    Headers(&'a HeaderMap),
}

impl<'a> ClassificationInput<'a> {
    /// The input as a single string; other shapes read as empty.
    pub fn as_text(&self) -> &'a str {
        match self {
            ClassificationInput::Text(text) => text,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: &[&str] = &["Bot", "crawler", "bot"];

    #[test]
    fn exact_rule_is_case_sensitive() {
        let set = PatternSet::new(AttackCategory::SqlInjection, MatchRule::Exact, SAMPLE);
        assert_eq!(set.matches("Bot"), vec!["Bot"]);
        assert!(set.matches("BOT").is_empty());
        assert!(set.matches("a Bot").is_empty());
    }

    #[test]
    fn contains_rule_keeps_declaration_order() {
        let set = PatternSet::new(
            AttackCategory::BotSimulation,
            MatchRule::ContainsIgnoreCase,
            SAMPLE,
        );
        let verdict = set.evaluate("CRAWLER-BOT/1.0");
        assert_eq!(verdict.matched_patterns(), &["Bot", "crawler", "bot"]);
        assert_eq!(verdict.first_match(), Some("Bot"));
    }

    #[test]
    fn empty_input_never_matches_containment() {
        let set = PatternSet::new(
            AttackCategory::BotSimulation,
            MatchRule::ContainsIgnoreCase,
            SAMPLE,
        );
        assert_eq!(set.evaluate(""), Verdict::NotMatched);
    }

    #[test]
    fn policies_cover_every_category() {
        let hard = AttackCategory::ALL
            .iter()
            .filter(|c| c.policy() == Policy::HardBlock)
            .count();
        let soft = AttackCategory::ALL
            .iter()
            .filter(|c| c.policy() == Policy::SoftAnnotate)
            .count();
        assert_eq!(hard, 6);
        assert_eq!(soft, 3);
        assert_eq!(AttackCategory::BotSimulation.policy(), Policy::Informational);
    }

    #[test]
    fn non_text_input_reads_as_empty() {
        let headers = HeaderMap::new();
        assert_eq!(ClassificationInput::Headers(&headers).as_text(), "");
        assert_eq!(ClassificationInput::Text("abc").as_text(), "abc");
    }
}
