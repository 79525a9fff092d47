//! Oversized request classification

use super::Verdict;

/// Inputs longer than this many characters are oversized.
pub const OVERSIZE_THRESHOLD: usize = 8000;

/// Diagnostic identifier reported when the threshold is exceeded.
pub const OVERSIZE_SIGNATURE: &str = "length>8000";

/// Length of `data` in characters (Unicode scalar values).
pub fn data_length(data: &str) -> usize {
    data.chars().count()
}

pub fn classify_size(data: &str) -> Verdict {
    if data_length(data) > OVERSIZE_THRESHOLD {
        Verdict::Matched(vec![OVERSIZE_SIGNATURE])
    } else {
        Verdict::NotMatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert!(!classify_size(&"a".repeat(OVERSIZE_THRESHOLD)).is_match());
        assert!(classify_size(&"a".repeat(OVERSIZE_THRESHOLD + 1)).is_match());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let data = "é".repeat(OVERSIZE_THRESHOLD);
        assert_eq!(data_length(&data), OVERSIZE_THRESHOLD);
        assert!(!classify_size(&data).is_match());
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(classify_size(""), Verdict::NotMatched);
    }
}
