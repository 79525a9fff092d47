// Soft-annotate endpoints: look-alike business data must always succeed
mod common;

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::common::{json_of, post_json, router};

    async fn post(path: &str, body: &str) -> (StatusCode, Value) {
        json_of(post_json(router(), &format!("/api/waftest/{path}"), body).await).await
    }

    #[tokio::test]
    async fn test_comment_submission_end_to_end() {
        let (status, body) = post(
            "comment-submission",
            r#"{"comment":"nice---post","author":"x"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "allowed");
        assert_eq!(body["containsSuspiciousPattern"], true);
        assert_eq!(body["matchedPatterns"], json!(["---", "--"]));
        assert_eq!(body["comment"], "nice---post");
        assert_eq!(body["author"], "x");
        assert!(body["submittedAt"].is_string());
    }

    #[tokio::test]
    async fn test_person_registration_flags_without_blocking() {
        let (status, body) = post(
            "person-registration",
            r#"{"name":"meneer havinga","email":"m@example.nl"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["containsSuspiciousPattern"], true);
        assert_eq!(body["matchedPatterns"], json!(["Meneer Havinga"]));
        assert_eq!(body["email"], "m@example.nl");

        let (status, body) = post(
            "person-registration",
            r#"{"name":"Jane Doe","email":"jane@example.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["containsSuspiciousPattern"], false);
        assert_eq!(body["matchedPatterns"], json!([]));
    }

    #[tokio::test]
    async fn test_person_registration_accepts_pascal_case_fields() {
        let (status, body) = post(
            "person-registration",
            r#"{"Name":"Mr. Test","Email":"t@example.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Mr. Test");
        assert_eq!(body["containsSuspiciousPattern"], true);
    }

    #[tokio::test]
    async fn test_vehicle_registration_reports_known_brand() {
        let (status, body) = post(
            "vehicle-registration",
            r#"{"brand":"Land Rover","model":"Defender","year":2021}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isKnownBrand"], true);
        assert_eq!(body["containsSuspiciousPattern"], true);
        assert_eq!(body["year"], 2021);

        let (status, body) = post(
            "vehicle-registration",
            r#"{"brand":"FORD","model":"Focus","year":2019}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isKnownBrand"], true);
        assert_eq!(body["containsSuspiciousPattern"], false);

        let (_, body) = post(
            "vehicle-registration",
            r#"{"brand":"Lada","model":"Niva","year":1990}"#,
        )
        .await;
        assert_eq!(body["isKnownBrand"], false);
    }

    #[tokio::test]
    async fn test_soft_annotate_survives_attack_text() {
        for (path, body) in [
            ("person-registration", r#"{"name":"1; DROP TABLE users--"}"#),
            ("vehicle-registration", r#"{"brand":"SELECT * FROM cars"}"#),
            ("comment-submission", r#"{"comment":"<script>alert(1)</script>"}"#),
        ] {
            let (status, json) = post(path, body).await;
            assert_eq!(status, StatusCode::OK, "{path} must never reject");
            assert_eq!(json["containsSuspiciousPattern"], true);
        }
    }

    #[tokio::test]
    async fn test_null_sibling_field_keeps_classified_field() {
        let (status, body) = post(
            "person-registration",
            r#"{"name":"Meneer Havinga","email":null}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Meneer Havinga");
        assert_eq!(body["email"], "");
        assert_eq!(body["containsSuspiciousPattern"], true);

        let (status, body) = post(
            "vehicle-registration",
            r#"{"brand":"LAND ROVER","model":"Defender","year":"2021"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["brand"], "LAND ROVER");
        assert_eq!(body["isKnownBrand"], true);
        assert_eq!(body["containsSuspiciousPattern"], true);
        assert_eq!(body["year"], 0);

        let (_, body) = post(
            "comment-submission",
            r#"{"comment":"nice---post","author":{"id":1}}"#,
        )
        .await;
        assert_eq!(body["comment"], "nice---post");
        assert_eq!(body["author"], "");
        assert_eq!(body["containsSuspiciousPattern"], true);
    }

    #[tokio::test]
    async fn test_malformed_bodies_degrade_to_defaults() {
        for path in [
            "person-registration",
            "vehicle-registration",
            "comment-submission",
        ] {
            let (status, json) = post(path, "definitely not json").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["containsSuspiciousPattern"], false);
        }

        let (_, json) = post("vehicle-registration", "").await;
        assert_eq!(json["brand"], "");
        assert_eq!(json["year"], 0);
    }
}
