//! Closing-keyword link detection
//!
//! Finds `fixes #12`-style references in free text. Only an unambiguous
//! text counts: if it carries more than one keyword reference, nothing is
//! resolved, even when one of them names the issue being classified.

use regex::Regex;
use std::sync::OnceLock;

fn closing_reference_regex() -> &'static Regex {
    static CLOSING_REFERENCE_REGEX: OnceLock<Regex> = OnceLock::new();

    CLOSING_REFERENCE_REGEX.get_or_init(|| {
        // close, closes, closed, fix, fixes, fixed, resolve, resolves, resolved
        Regex::new(r"(?i)\b(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+#(\d+)\b").unwrap()
    })
}

/// Return the issue number referenced by a closing keyword in `text`
///
/// Returns `None` when there is no reference or more than one.
pub fn find_closing_reference(text: &str) -> Option<u64> {
    let mut numbers = closing_reference_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1));

    let first = numbers.next()?;
    if numbers.next().is_some() {
        return None;
    }

    first.as_str().parse().ok()
}

/// Whether `text` unambiguously closes issue `number`
pub fn links_issue(text: &str, number: u64) -> bool {
    find_closing_reference(text) == Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_form() {
        for keyword in [
            "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves",
            "resolved",
        ] {
            let text = format!("This {} #42 for good", keyword);
            assert_eq!(find_closing_reference(&text), Some(42), "{}", keyword);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(find_closing_reference("FIXES #7"), Some(7));
        assert_eq!(find_closing_reference("Resolves #7"), Some(7));
    }

    #[test]
    fn test_word_bounded() {
        assert_eq!(find_closing_reference("prefixes #7"), None);
        assert_eq!(find_closing_reference("unresolved #7"), None);
        assert_eq!(find_closing_reference("fixes #7abc"), None);
    }

    #[test]
    fn test_plain_mention_is_not_a_link() {
        assert_eq!(find_closing_reference("see #42 for context"), None);
    }

    #[test]
    fn test_two_references_are_ambiguous() {
        let body = "fixes #42\n\nalso fixes #43";
        assert_eq!(find_closing_reference(body), None);
        assert!(!links_issue(body, 42));
        assert!(!links_issue(body, 43));
    }

    #[test]
    fn test_repeated_reference_is_still_ambiguous() {
        assert_eq!(find_closing_reference("fixes #42, closes #42"), None);
    }

    #[test]
    fn test_links_issue_requires_matching_number() {
        assert!(links_issue("Closes #42", 42));
        assert!(!links_issue("Closes #41", 42));
        assert!(!links_issue("", 42));
    }

    #[test]
    fn test_reference_inside_longer_body() {
        let body = "## Summary\nRework the parser.\n\nFixes #1234\n\n- [x] tests";
        assert_eq!(find_closing_reference(body), Some(1234));
    }
}
