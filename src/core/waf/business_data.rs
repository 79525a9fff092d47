//! Look-alike business data
//!
//! Legitimate registrations and comments sometimes contain strings that
//! resemble attack signatures: a surname next to a SQL keyword, a vehicle
//! brand, a markdown rule made of dashes. These tables only annotate; the
//! endpoints always accept the data so WAF false positives become visible.

use once_cell::sync::Lazy;

use super::{AttackCategory, MatchRule, PatternSet, Verdict};

static PERSON_NAME_TOKENS: &[&str] = &[
    "Meneer Havinga",
    "LAND ROVER",
    "---",
    "--",
    "Mr. Test",
    "SELECT",
    "UNION",
    "DROP",
];

static VEHICLE_BRAND_TOKENS: &[&str] = &[
    "LAND ROVER",
    "MERCEDES-BENZ",
    "---",
    "--",
    "SELECT",
    "UNION",
    "DROP",
];

static COMMENT_TOKENS: &[&str] = &["---", "--", "/*", "*/", "<!--", "-->", "<script", "</script"];

/// Reference list of vehicle brands (informational, not attack detection)
static KNOWN_BRANDS: &[&str] = &[
    "LAND ROVER",
    "MERCEDES-BENZ",
    "BMW",
    "AUDI",
    "VOLKSWAGEN",
    "FORD",
    "TOYOTA",
];

pub static PERSON_NAME_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::PersonRegistration,
        MatchRule::ContainsIgnoreCase,
        PERSON_NAME_TOKENS,
    )
});

pub static VEHICLE_BRAND_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::VehicleRegistration,
        MatchRule::ContainsIgnoreCase,
        VEHICLE_BRAND_TOKENS,
    )
});

pub static COMMENT_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::CommentSubmission,
        MatchRule::ContainsIgnoreCase,
        COMMENT_TOKENS,
    )
});

pub fn classify_person_name(name: &str) -> Verdict {
    PERSON_NAME_PATTERNS.evaluate(name)
}

pub fn classify_vehicle_brand(brand: &str) -> Verdict {
    VEHICLE_BRAND_PATTERNS.evaluate(brand)
}

pub fn classify_comment(comment: &str) -> Verdict {
    COMMENT_PATTERNS.evaluate(comment)
}

/// Whether `brand` equals a known brand, ignoring case.
pub fn is_known_brand(brand: &str) -> bool {
    !brand.is_empty()
        && KNOWN_BRANDS
            .iter()
            .any(|known| known.to_lowercase() == brand.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name_lookalikes() {
        assert!(classify_person_name("meneer havinga").is_match());
        assert!(classify_person_name("Anna Select").is_match());
        assert!(!classify_person_name("Jan de Vries").is_match());
        assert!(!classify_person_name("").is_match());
    }

    #[test]
    fn test_dashes_match_both_tokens() {
        assert_eq!(classify_comment("nice---post").matched_patterns(), &["---", "--"]);
    }

    #[test]
    fn test_comment_markup() {
        assert!(classify_comment("<SCRIPT src=x>").is_match());
        assert!(classify_comment("see /* note */").is_match());
        assert!(!classify_comment("Looks good to me - ship it").is_match());
    }

    #[test]
    fn test_vehicle_brand_annotation() {
        assert!(classify_vehicle_brand("Land Rover").is_match());
        assert!(classify_vehicle_brand("mercedes-benz").is_match());
        assert!(!classify_vehicle_brand("Toyota").is_match());
    }

    #[test]
    fn test_known_brand_requires_equality() {
        assert!(is_known_brand("land rover"));
        assert!(is_known_brand("BMW"));
        assert!(!is_known_brand("BMW M3"));
        assert!(!is_known_brand(""));
    }
}
