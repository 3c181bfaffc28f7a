//! Decoding and best-effort validation of bracketed arbitrary values.
//!
//! The decoder sees the content between a balanced `[...]` pair and
//! classifies it against common CSS value grammars for warning purposes.
//! Underscore-to-space substitution is deliberately not done here; that is a
//! selector/value concern owned by the CSS pipeline.

use std::sync::OnceLock;

use regex::Regex;

use crate::segment::is_balanced;

/// Decoded content of an arbitrary value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedValue {
    pub value: String,
    /// Best-effort CSS data type (`color`, `length`, `selector`, ...).
    pub data_type: Option<String>,
}

/// Data-type hints that may prefix an arbitrary value, e.g.
/// `text-[length:var(--thumb-size)]`.
const DATA_TYPE_HINTS: &[&str] = &[
    "color",
    "length",
    "percentage",
    "url",
    "image",
    "angle",
    "number",
    "family-name",
];

/// Decode the content of a bracketed arbitrary value.
///
/// Returns `None` for empty or unbalanced content; the caller treats the
/// whole candidate as unparseable. Never panics.
pub fn decode_arbitrary_value(raw: &str) -> Option<DecodedValue> {
    if raw.is_empty() || !is_balanced(raw) {
        return None;
    }

    if let Some((hint, rest)) = raw.split_once(':') {
        if DATA_TYPE_HINTS.contains(&hint) && !rest.is_empty() {
            return Some(DecodedValue {
                value: rest.to_string(),
                data_type: Some(hint.to_string()),
            });
        }
    }

    Some(DecodedValue {
        value: raw.to_string(),
        data_type: classify(raw).map(str::to_string),
    })
}

/// Best-effort classification of an arbitrary value's CSS data type.
pub fn classify(value: &str) -> Option<&'static str> {
    if value.starts_with("--") || value.starts_with("var(") {
        return Some("custom-property");
    }
    if value.starts_with('#')
        || value.starts_with("rgb(")
        || value.starts_with("rgba(")
        || value.starts_with("hsl(")
        || value.starts_with("hsla(")
        || value.starts_with("oklch(")
    {
        return Some("color");
    }
    if value.starts_with("url(") {
        return Some("url");
    }
    if value.contains('&') || value.starts_with('.') || value.starts_with('>') || value.starts_with('*') {
        return Some("selector");
    }
    if length_pattern().is_match(value) {
        return Some("length");
    }
    None
}

/// Whether `value` is acceptable where `expected_type` is required.
///
/// Unknown or ambiguous values are treated as valid-but-unverified; callers
/// may attach a warning but must not fail the candidate.
pub fn is_valid_arbitrary(value: &str, expected_type: &str) -> bool {
    match classify(value) {
        Some(actual) => actual == expected_type,
        None => true,
    }
}

fn length_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?(\d+\.?\d*|\.\d+)(px|rem|em|%|vh|vw|vmin|vmax|ch|ex|pt|fr|s|ms|deg|turn)$")
            .expect("length pattern is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_value() {
        let decoded = decode_arbitrary_value("1fr_2fr").unwrap();
        assert_eq!(decoded.value, "1fr_2fr");
        assert_eq!(decoded.data_type, None);
    }

    #[test]
    fn test_decode_color() {
        let decoded = decode_arbitrary_value("#1a73e8").unwrap();
        assert_eq!(decoded.data_type.as_deref(), Some("color"));
    }

    #[test]
    fn test_decode_length() {
        assert_eq!(
            decode_arbitrary_value("37px").unwrap().data_type.as_deref(),
            Some("length")
        );
        assert_eq!(
            decode_arbitrary_value("-0.5rem").unwrap().data_type.as_deref(),
            Some("length")
        );
    }

    #[test]
    fn test_decode_selector_fragment() {
        let decoded = decode_arbitrary_value("&_p").unwrap();
        assert_eq!(decoded.data_type.as_deref(), Some("selector"));
    }

    #[test]
    fn test_decode_custom_property() {
        assert_eq!(
            decode_arbitrary_value("var(--thumb-size)")
                .unwrap()
                .data_type
                .as_deref(),
            Some("custom-property")
        );
    }

    #[test]
    fn test_explicit_type_hint() {
        let decoded = decode_arbitrary_value("length:var(--thumb-size)").unwrap();
        assert_eq!(decoded.value, "var(--thumb-size)");
        assert_eq!(decoded.data_type.as_deref(), Some("length"));
    }

    #[test]
    fn test_unbalanced_is_rejected() {
        assert_eq!(decode_arbitrary_value("calc(1+2"), None);
        assert_eq!(decode_arbitrary_value(""), None);
    }

    #[test]
    fn test_is_valid_arbitrary_never_fails_unknowns() {
        assert!(is_valid_arbitrary("#fff", "color"));
        assert!(!is_valid_arbitrary("#fff", "length"));
        // Unknown values are valid-but-unverified.
        assert!(is_valid_arbitrary("anything-goes", "color"));
    }
}
