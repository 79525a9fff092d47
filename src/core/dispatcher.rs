//! Endpoint dispatch: input extraction, classification and envelope mapping.
//!
//! Each test endpoint is a single step: take the canonical input, run the
//! category classifier, build the envelope. Nothing here touches shared
//! state, so the same input always produces the same verdict.

use std::{collections::BTreeMap, net::IpAddr};

use axum::http::{HeaderMap, StatusCode};
use serde_json::{Value, json};

use super::{
    envelope::{BLOCKED_STATUS, Outcome, ResponseEnvelope, WAF_EXPECTED_STATUS},
    models::{CommentSubmissionRequest, PersonRegistrationRequest, VehicleRegistrationRequest},
    waf::{
        AttackCategory, ClassificationInput, OVERSIZE_THRESHOLD, Policy, Verdict, classify,
        bot_detector::detected_pattern, is_known_brand, size_limit::data_length,
    },
};

/// Test endpoints advertised by `GET /api/waftest`.
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /api/waftest/safe - Safe endpoint",
    "GET /api/waftest/sql-injection?userId= - SQL injection test",
    "GET /api/waftest/xss?comment= - XSS test",
    "GET /api/waftest/path-traversal?filePath= - Path traversal test",
    "POST /api/waftest/malicious-payload - Malicious payload test",
    "GET /api/waftest/bot-simulation - Bot simulation test",
    "GET /api/waftest/large-request?data= - Oversized request test",
    "GET /api/waftest/protocol-attack - Protocol attack test (echoes headers)",
    "GET /api/waftest/command-injection?command= - Command injection test",
    "POST /api/waftest/person-registration - Person registration with 'Meneer Havinga' test",
    "POST /api/waftest/vehicle-registration - Vehicle registration with 'LAND ROVER' test",
    "POST /api/waftest/comment-submission - Comment submission with '---' pattern test",
];

/// An envelope together with the HTTP status it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub status: StatusCode,
    pub envelope: ResponseEnvelope,
}

impl Dispatched {
    fn ok(envelope: ResponseEnvelope) -> Self {
        Self {
            status: StatusCode::OK,
            envelope,
        }
    }

    fn rejected(envelope: ResponseEnvelope) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            envelope,
        }
    }
}

/// Wording for one hard-block endpoint.
struct HardBlockEndpoint {
    category: AttackCategory,
    /// Key the input is echoed under when it passes
    echo_key: &'static str,
    blocked_message: &'static str,
    allowed_message: &'static str,
}

const SQL_INJECTION: HardBlockEndpoint = HardBlockEndpoint {
    category: AttackCategory::SqlInjection,
    echo_key: "userId",
    blocked_message: "Malicious SQL injection detected",
    allowed_message: "SQL query would be executed here",
};

const XSS: HardBlockEndpoint = HardBlockEndpoint {
    category: AttackCategory::Xss,
    echo_key: "comment",
    blocked_message: "Malicious script detected",
    allowed_message: "Comment would be displayed here",
};

const PATH_TRAVERSAL: HardBlockEndpoint = HardBlockEndpoint {
    category: AttackCategory::PathTraversal,
    echo_key: "filePath",
    blocked_message: "Path traversal attempt detected",
    allowed_message: "File would be accessed here",
};

const COMMAND_INJECTION: HardBlockEndpoint = HardBlockEndpoint {
    category: AttackCategory::CommandInjection,
    echo_key: "command",
    blocked_message: "Command injection attempt detected",
    allowed_message: "Command would be executed here",
};

const MALICIOUS_PAYLOAD: HardBlockEndpoint = HardBlockEndpoint {
    category: AttackCategory::MaliciousPayload,
    echo_key: "receivedPayload",
    blocked_message: "Malicious payload detected",
    allowed_message: "Payload would be processed here",
};

fn hard_block(endpoint: &HardBlockEndpoint, input: ClassificationInput<'_>, echo: Value) -> Dispatched {
    debug_assert_eq!(endpoint.category.policy(), Policy::HardBlock);

    match classify(endpoint.category, input) {
        Verdict::Matched(patterns) => {
            tracing::warn!(
                category = %endpoint.category,
                patterns = ?patterns,
                "Input rejected by application logic"
            );
            Dispatched::rejected(
                ResponseEnvelope::new(endpoint.blocked_message, BLOCKED_STATUS, Outcome::Rejected)
                    .with("input", echo)
                    .with("matchedPatterns", patterns),
            )
        }
        Verdict::NotMatched => Dispatched::ok(
            ResponseEnvelope::new(
                endpoint.allowed_message,
                WAF_EXPECTED_STATUS,
                Outcome::Allowed,
            )
            .with(endpoint.echo_key, echo),
        ),
    }
}

/// Look up a query parameter by name, ignoring case; absent reads as empty.
pub fn query_value<'a>(params: &'a [(String, String)], name: &str) -> &'a str {
    params
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

pub fn list_endpoints() -> Value {
    json!({
        "message": "WAF Testing Controller",
        "availableEndpoints": AVAILABLE_ENDPOINTS,
    })
}

pub fn safe() -> Dispatched {
    tracing::info!("Safe endpoint accessed");
    Dispatched::ok(
        ResponseEnvelope::new("This is a safe endpoint", "Success", Outcome::Allowed).with(
            "data",
            json!({"userId": 1, "userName": "TestUser", "role": "User"}),
        ),
    )
}

pub fn sql_injection(user_id: &str) -> Dispatched {
    tracing::warn!(
        "SQL injection test endpoint accessed with userId: {}",
        user_id
    );
    hard_block(&SQL_INJECTION, ClassificationInput::Text(user_id), user_id.into())
}

pub fn xss(comment: &str) -> Dispatched {
    tracing::warn!("XSS test endpoint accessed with comment: {}", comment);
    hard_block(&XSS, ClassificationInput::Text(comment), comment.into())
}

pub fn path_traversal(file_path: &str) -> Dispatched {
    tracing::warn!(
        "Path traversal test endpoint accessed with filePath: {}",
        file_path
    );
    hard_block(
        &PATH_TRAVERSAL,
        ClassificationInput::Text(file_path),
        file_path.into(),
    )
}

pub fn command_injection(command: &str) -> Dispatched {
    tracing::warn!(
        "Command injection test endpoint accessed with command: {}",
        command
    );
    hard_block(
        &COMMAND_INJECTION,
        ClassificationInput::Text(command),
        command.into(),
    )
}

/// `raw` is the request body as received and `payload` its parsed form,
/// `Value::Null` when the body was absent or not JSON. Classification runs
/// on the raw text so JSON escapes are seen undecoded; the parsed value is
/// only echoed.
pub fn malicious_payload(raw: &str, payload: &Value) -> Dispatched {
    tracing::warn!(
        "Malicious payload test endpoint accessed with payload: {}",
        payload
    );
    let text = if payload.is_null() { "" } else { raw };
    hard_block(
        &MALICIOUS_PAYLOAD,
        ClassificationInput::Text(text),
        payload.clone(),
    )
}

pub fn large_request(data: &str) -> Dispatched {
    let length = data_length(data);
    tracing::info!(
        "Large request test endpoint accessed with data length: {}",
        length
    );

    match classify(
        AttackCategory::OversizedRequest,
        ClassificationInput::Text(data),
    ) {
        Verdict::Matched(patterns) => {
            tracing::warn!(
                length,
                threshold = OVERSIZE_THRESHOLD,
                "Oversized input rejected by application logic"
            );
            Dispatched::rejected(
                ResponseEnvelope::new("Request too large", BLOCKED_STATUS, Outcome::Rejected)
                    .with("dataLength", length)
                    .with("input", data)
                    .with("matchedPatterns", patterns),
            )
        }
        Verdict::NotMatched => Dispatched::ok(
            ResponseEnvelope::new("Request processed", "Success", Outcome::Allowed)
                .with("dataLength", length),
        ),
    }
}

pub fn bot_simulation(user_agent: &str, client_ip: Option<IpAddr>) -> Dispatched {
    tracing::warn!("Bot simulation test endpoint accessed");

    let detected = detected_pattern(user_agent);
    let bot_detected = !detected.is_empty();
    if bot_detected {
        tracing::warn!("Bot pattern detected in User-Agent: {}", user_agent);
    }

    Dispatched::ok(
        ResponseEnvelope::new(
            "Bot simulation test endpoint",
            "Bot detection is informational only",
            Outcome::Informational,
        )
        .with("userAgent", user_agent)
        .with("clientIp", client_ip.map(|ip| ip.to_string()))
        .with("testType", "Bot Manager Detection")
        .with(
            "importantNote",
            "Bot Manager may return 200 OK - this is NORMAL behavior!",
        )
        .with(
            "explanation",
            json!({
                "botManagerBehavior": "Uses behavioral analysis over time, not immediate content blocking",
                "firstRequests": "Often allowed to establish patterns",
                "productionBlocking": "Effectively blocks real bots based on behavior",
                "demoRecommendation": "Use OWASP tests (SQL, XSS, Path Traversal) for guaranteed 403 responses",
            }),
        )
        .with(
            "expectedResult",
            "200 OK (Bot Manager learning) OR 403 Blocked (if pattern detected)",
        )
        .with("botPatternDetected", bot_detected)
        .with("detectedPattern", detected),
    )
}

/// Echo every received header; repeated headers are joined with `,`.
pub fn protocol_attack(headers: &HeaderMap) -> Dispatched {
    tracing::warn!("Protocol attack test endpoint accessed");

    let mut echoed: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers.iter() {
        let value = String::from_utf8_lossy(value.as_bytes());
        echoed
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }

    Dispatched::ok(
        ResponseEnvelope::new(
            "Protocol attack simulation",
            "This might trigger WAF protocol rules",
            Outcome::Informational,
        )
        .with("headers", json!(echoed)),
    )
}

fn annotate(category: AttackCategory, field: &str) -> Verdict {
    debug_assert_eq!(category.policy(), Policy::SoftAnnotate);
    classify(category, ClassificationInput::Text(field))
}

pub fn person_registration(request: &PersonRegistrationRequest) -> Dispatched {
    tracing::info!(
        "Person registration test endpoint accessed with name: {}",
        request.name
    );

    let verdict = annotate(AttackCategory::PersonRegistration, &request.name);
    if verdict.is_match() {
        tracing::warn!(
            "Potentially problematic name pattern detected: {}",
            request.name
        );
    }

    Dispatched::ok(
        ResponseEnvelope::new(
            "Person registration processed",
            "Registration successful - WAF allows legitimate data",
            Outcome::Allowed,
        )
        .with("name", request.name.as_str())
        .with("email", request.email.as_str())
        .with("containsSuspiciousPattern", verdict.is_match())
        .with("matchedPatterns", verdict.matched_patterns().to_vec())
        .with("registeredAt", chrono::Utc::now().to_rfc3339()),
    )
}

pub fn vehicle_registration(request: &VehicleRegistrationRequest) -> Dispatched {
    tracing::info!(
        "Vehicle registration test endpoint accessed with brand: {}",
        request.brand
    );

    let verdict = annotate(AttackCategory::VehicleRegistration, &request.brand);
    if verdict.is_match() {
        tracing::warn!(
            "Potentially problematic brand pattern detected: {}",
            request.brand
        );
    }

    Dispatched::ok(
        ResponseEnvelope::new(
            "Vehicle registration processed",
            "Vehicle registration successful - WAF handles legitimate vehicle data",
            Outcome::Allowed,
        )
        .with("brand", request.brand.as_str())
        .with("model", request.model.as_str())
        .with("year", request.year)
        .with("isKnownBrand", is_known_brand(&request.brand))
        .with("containsSuspiciousPattern", verdict.is_match())
        .with("matchedPatterns", verdict.matched_patterns().to_vec())
        .with("registeredAt", chrono::Utc::now().to_rfc3339()),
    )
}

pub fn comment_submission(request: &CommentSubmissionRequest) -> Dispatched {
    tracing::info!(
        "Comment submission test endpoint accessed with comment length: {}",
        request.comment.chars().count()
    );

    let verdict = annotate(AttackCategory::CommentSubmission, &request.comment);
    if verdict.is_match() {
        tracing::warn!(
            "Suspicious pattern detected in comment: {}",
            request.comment
        );
    }

    Dispatched::ok(
        ResponseEnvelope::new(
            "Comment submitted successfully",
            "Comment processed - WAF evaluates content patterns",
            Outcome::Allowed,
        )
        .with("comment", request.comment.as_str())
        .with("author", request.author.as_str())
        .with("containsSuspiciousPattern", verdict.is_match())
        .with("matchedPatterns", verdict.matched_patterns().to_vec())
        .with("submittedAt", chrono::Utc::now().to_rfc3339()),
    )
}
