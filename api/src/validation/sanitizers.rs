//! Input sanitization functions
//!
//! Free-text fields are stripped of markup before persistence and
//! rendering. Legitimate plain text must come through untouched: unicode,
//! punctuation and line breaks are preserved, so already-plain input is a
//! fixed point of [`sanitize_free_text`].

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Pattern to match HTML/XML tags
    static ref HTML_TAG_PATTERN: Regex = Regex::new(r"<[^>]*>").unwrap();

    /// Pattern to match control characters (except newline, carriage return and tab)
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap();
}

/// Strip all HTML tags from a string
pub fn strip_html(value: &str) -> String {
    HTML_TAG_PATTERN.replace_all(value, "").to_string()
}

/// Remove control characters, preserving newlines and tabs
pub fn remove_control_chars(value: &str) -> String {
    CONTROL_CHARS.replace_all(value, "").to_string()
}

/// Sanitize a free-text field: trim, drop control chars, strip markup
pub fn sanitize_free_text(value: &str) -> String {
    let trimmed = value.trim();
    let no_control = remove_control_chars(trimmed);
    strip_html(&no_control)
}

/// Sanitize an optional free-text field; a value emptied by sanitization
/// collapses to `None`
pub fn sanitize_free_text_optional(value: &mut Option<String>) {
    if let Some(ref mut s) = value {
        *s = sanitize_free_text(s);
        if s.trim().is_empty() {
            *value = None;
        }
    }
}

/// Escape special characters for interpolation into an HTML document
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<b>bold</b>"), "bold");
        assert_eq!(strip_html("<script>alert(1)</script>Test"), "alert(1)Test");
        assert_eq!(strip_html("no tags here"), "no tags here");
        assert_eq!(strip_html("<p>paragraphe</p><br/>suite"), "paragraphesuite");
    }

    #[test]
    fn test_plain_text_is_a_fixed_point() {
        let plain = "Mon ordinateur ne démarre plus depuis hier, l'écran reste noir.";
        assert_eq!(sanitize_free_text(plain), plain);
    }

    #[test]
    fn test_line_breaks_and_unicode_preserved() {
        let text = "Ligne 1\nLigne 2 — câble HS, écran «noir»\n\tdétail";
        assert_eq!(sanitize_free_text(text), text);
    }

    #[test]
    fn test_script_injection_neutralized() {
        let dirty = "<script>alert(1)</script>Test";
        let clean = sanitize_free_text(dirty);
        assert!(!clean.contains('<'));
        assert!(clean.ends_with("Test"));
    }

    #[test]
    fn test_control_chars_removed() {
        assert_eq!(remove_control_chars("a\x00b\x07c"), "abc");
        assert_eq!(remove_control_chars("a\nb\tc"), "a\nb\tc");
    }

    #[test]
    fn test_optional_collapses_to_none_when_emptied() {
        let mut value = Some("<br/>".to_string());
        sanitize_free_text_optional(&mut value);
        assert_eq!(value, None);

        let mut kept = Some("  ACME SARL  ".to_string());
        sanitize_free_text_optional(&mut kept);
        assert_eq!(kept, Some("ACME SARL".to_string()));

        let mut none: Option<String> = None;
        sanitize_free_text_optional(&mut none);
        assert_eq!(none, None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("l'écran"), "l&#x27;écran");
    }
}
