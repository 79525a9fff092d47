//! Category to classifier mapping

use super::{
    AttackCategory, ClassificationInput, Verdict, body_inspector, bot_detector, business_data,
    command_injection, path_traversal, size_limit, sql_injection, xss_detector,
};

/// Signature of every classifier in the table.
pub type ClassifierFn = fn(ClassificationInput<'_>) -> Verdict;

fn sql_injection_input(input: ClassificationInput<'_>) -> Verdict {
    sql_injection::classify_user_id(input.as_text())
}

fn xss_input(input: ClassificationInput<'_>) -> Verdict {
    xss_detector::classify_comment_markup(input.as_text())
}

fn path_traversal_input(input: ClassificationInput<'_>) -> Verdict {
    path_traversal::classify_file_path(input.as_text())
}

fn command_injection_input(input: ClassificationInput<'_>) -> Verdict {
    command_injection::classify_command(input.as_text())
}

fn malicious_payload_input(input: ClassificationInput<'_>) -> Verdict {
    match input {
        ClassificationInput::Payload(payload) => body_inspector::classify_payload(payload),
        ClassificationInput::Text(text) => body_inspector::classify_body_text(text),
        ClassificationInput::Headers(_) => Verdict::NotMatched,
    }
}

fn bot_simulation_input(input: ClassificationInput<'_>) -> Verdict {
    match input {
        ClassificationInput::Headers(headers) => bot_detector::classify_user_agent(
            headers
                .get(http::header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or(""),
        ),
        other => bot_detector::classify_user_agent(other.as_text()),
    }
}

fn oversized_request_input(input: ClassificationInput<'_>) -> Verdict {
    size_limit::classify_size(input.as_text())
}

// Headers are echoed, never judged.
fn protocol_attack_input(_input: ClassificationInput<'_>) -> Verdict {
    Verdict::NotMatched
}

fn person_registration_input(input: ClassificationInput<'_>) -> Verdict {
    business_data::classify_person_name(input.as_text())
}

fn vehicle_registration_input(input: ClassificationInput<'_>) -> Verdict {
    business_data::classify_vehicle_brand(input.as_text())
}

fn comment_submission_input(input: ClassificationInput<'_>) -> Verdict {
    business_data::classify_comment(input.as_text())
}

impl AttackCategory {
    /// The classifier responsible for this category.
    pub fn classifier(&self) -> ClassifierFn {
        match self {
            AttackCategory::SqlInjection => sql_injection_input,
            AttackCategory::Xss => xss_input,
            AttackCategory::PathTraversal => path_traversal_input,
            AttackCategory::CommandInjection => command_injection_input,
            AttackCategory::MaliciousPayload => malicious_payload_input,
            AttackCategory::BotSimulation => bot_simulation_input,
            AttackCategory::OversizedRequest => oversized_request_input,
            AttackCategory::ProtocolAttack => protocol_attack_input,
            AttackCategory::PersonRegistration => person_registration_input,
            AttackCategory::VehicleRegistration => vehicle_registration_input,
            AttackCategory::CommentSubmission => comment_submission_input,
        }
    }
}

/// Classify `input` under `category`.
pub fn classify(category: AttackCategory, input: ClassificationInput<'_>) -> Verdict {
    (category.classifier())(input)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};
    use serde_json::json;

    use super::*;
    use crate::core::waf::{MatchRule, PatternSet, Policy};

    #[test]
    fn test_every_table_is_bound_to_its_category() {
        let tables: [(&PatternSet, AttackCategory, MatchRule, usize); 9] = [
            (
                &*sql_injection::SQL_INJECTION_PATTERNS,
                AttackCategory::SqlInjection,
                MatchRule::Exact,
                5,
            ),
            (
                &*xss_detector::XSS_PATTERNS,
                AttackCategory::Xss,
                MatchRule::ContainsIgnoreCase,
                5,
            ),
            (
                &*path_traversal::PATH_TRAVERSAL_PATTERNS,
                AttackCategory::PathTraversal,
                MatchRule::ContainsIgnoreCase,
                5,
            ),
            (
                &*command_injection::COMMAND_INJECTION_PATTERNS,
                AttackCategory::CommandInjection,
                MatchRule::ContainsIgnoreCase,
                12,
            ),
            (
                &*body_inspector::PAYLOAD_PATTERNS,
                AttackCategory::MaliciousPayload,
                MatchRule::ContainsIgnoreCase,
                7,
            ),
            (
                &*bot_detector::BOT_PATTERNS,
                AttackCategory::BotSimulation,
                MatchRule::ContainsIgnoreCase,
                5,
            ),
            (
                &*business_data::PERSON_NAME_PATTERNS,
                AttackCategory::PersonRegistration,
                MatchRule::ContainsIgnoreCase,
                8,
            ),
            (
                &*business_data::VEHICLE_BRAND_PATTERNS,
                AttackCategory::VehicleRegistration,
                MatchRule::ContainsIgnoreCase,
                7,
            ),
            (
                &*business_data::COMMENT_PATTERNS,
                AttackCategory::CommentSubmission,
                MatchRule::ContainsIgnoreCase,
                8,
            ),
        ];

        for (table, category, rule, len) in tables {
            assert_eq!(table.category(), category);
            assert_eq!(table.rule(), rule);
            assert_eq!(table.patterns().len(), len, "{category}");
            // Each listed signature, submitted verbatim, is caught by its own classifier
            for pattern in table.patterns() {
                assert!(
                    classify(category, ClassificationInput::Text(pattern)).is_match(),
                    "{category}: {pattern:?}"
                );
            }
        }
    }

    /// One signature per category that must match, and one input that must not.
    fn cases() -> Vec<(AttackCategory, &'static str, &'static str)> {
        vec![
            (AttackCategory::SqlInjection, "admin'--", "admin"),
            (AttackCategory::Xss, "<svg onload=alert('XSS')>", "<b>hi</b>"),
            (AttackCategory::PathTraversal, "../etc/shadow", "docs/readme.md"),
            (AttackCategory::CommandInjection, "a && b", "ping"),
            (AttackCategory::MaliciousPayload, "atob base64", "plain"),
            (AttackCategory::BotSimulation, "SiteScanner/2", "Mozilla/5.0"),
            (AttackCategory::PersonRegistration, "Mr. Test", "Jane Doe"),
            (AttackCategory::VehicleRegistration, "LAND ROVER", "FORD"),
            (AttackCategory::CommentSubmission, "<!-- hidden -->", "hello"),
        ]
    }

    #[test]
    fn test_table_driven_classification() {
        for (category, hit, miss) in cases() {
            assert!(
                classify(category, ClassificationInput::Text(hit)).is_match(),
                "{category} should match {hit:?}"
            );
            assert!(
                !classify(category, ClassificationInput::Text(miss)).is_match(),
                "{category} should not match {miss:?}"
            );
        }
    }

    #[test]
    fn test_case_insensitive_categories() {
        for (category, hit, _) in cases() {
            if category == AttackCategory::SqlInjection {
                continue;
            }
            let upper = hit.to_uppercase();
            assert!(
                classify(category, ClassificationInput::Text(&upper)).is_match(),
                "{category} should ignore case for {upper:?}"
            );
        }
        assert!(
            !classify(
                AttackCategory::SqlInjection,
                ClassificationInput::Text("ADMIN'--")
            )
            .is_match()
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        for category in AttackCategory::ALL {
            for input in ["admin'--", "nice---post", "", "Googlebot"] {
                let first = classify(category, ClassificationInput::Text(input));
                let second = classify(category, ClassificationInput::Text(input));
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_informational_categories_read_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", HeaderValue::from_static("python crawler"));
        let verdict = classify(
            AttackCategory::BotSimulation,
            ClassificationInput::Headers(&headers),
        );
        assert_eq!(verdict.first_match(), Some("crawler"));
        assert_eq!(
            classify(
                AttackCategory::ProtocolAttack,
                ClassificationInput::Headers(&headers)
            ),
            Verdict::NotMatched
        );
        assert_eq!(
            AttackCategory::ProtocolAttack.policy(),
            Policy::Informational
        );
    }

    #[test]
    fn test_payload_and_mismatched_shapes() {
        let payload = json!({"script": "document.cookie"});
        assert!(
            classify(
                AttackCategory::MaliciousPayload,
                ClassificationInput::Payload(&payload)
            )
            .is_match()
        );
        assert!(
            !classify(
                AttackCategory::SqlInjection,
                ClassificationInput::Payload(&payload)
            )
            .is_match()
        );
    }

    #[test]
    fn test_oversized_boundary_through_table() {
        let exact = "x".repeat(8000);
        let over = "x".repeat(8001);
        assert!(
            !classify(
                AttackCategory::OversizedRequest,
                ClassificationInput::Text(&exact)
            )
            .is_match()
        );
        assert!(
            classify(
                AttackCategory::OversizedRequest,
                ClassificationInput::Text(&over)
            )
            .is_match()
        );
    }
}
