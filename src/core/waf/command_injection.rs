//! Command injection classification
//!
//! Flags shell metacharacters and common command names anywhere in the
//! input. The list is deliberately blunt: short names such as `id` and `ls`
//! also hit ordinary words, mirroring how naive application filters behave.

use once_cell::sync::Lazy;

use super::{AttackCategory, MatchRule, PatternSet, Verdict};

/// Shell metacharacters followed by command names
static COMMAND_TOKENS: &[&str] = &[
    ";", "&", "|", "`", "$", "ls", "cat", "rm", "del", "dir", "whoami", "id",
];

pub static COMMAND_INJECTION_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(
        AttackCategory::CommandInjection,
        MatchRule::ContainsIgnoreCase,
        COMMAND_TOKENS,
    )
});

/// Classify a command string supplied by the client.
pub fn classify_command(command: &str) -> Verdict {
    COMMAND_INJECTION_PATTERNS.evaluate(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_chaining() {
        let verdict = classify_command("ping 127.0.0.1; whoami");
        assert_eq!(verdict.matched_patterns(), &[";", "whoami"]);
    }

    #[test]
    fn test_substitution_and_pipes() {
        assert!(classify_command("`uname`").is_match());
        assert!(classify_command("$(reboot)").is_match());
        assert!(classify_command("echo hi | sh").is_match());
    }

    #[test]
    fn test_command_names_ignore_case() {
        assert!(classify_command("WHOAMI").is_match());
        assert_eq!(classify_command("CAT").first_match(), Some("cat"));
    }

    #[test]
    fn test_plain_word_passes() {
        assert!(!classify_command("ping").is_match());
        assert!(!classify_command("").is_match());
    }

    #[test]
    fn test_short_names_hit_inside_words() {
        // "identity" contains "id"
        assert!(classify_command("identity").is_match());
    }
}
