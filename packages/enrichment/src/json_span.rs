//! Balanced-bracket extraction of JSON from free-form model output.
//!
//! Generative models rarely return bare JSON: the payload usually sits
//! inside chatter ("Sure! Here are the tools: [...] hope that helps").
//! Regex cannot balance arbitrary nesting, so this module is a small
//! explicit state machine: find the first opening bracket of the target
//! kind, then walk a depth counter until it returns to zero.
//!
//! Inside the candidate span the walker is string-literal aware (tracks
//! `"` and `\` escapes), so brackets embedded in JSON string values do
//! not distort the span. Text before the first opening bracket is
//! skipped without state tracking.

use serde::de::DeserializeOwned;

use crate::error::{EnrichmentError, Result};

/// The kind of JSON value being sought.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// A top-level array: `[...]`
    Array,
    /// A top-level object: `{...}`
    Object,
}

impl JsonKind {
    fn open(self) -> char {
        match self {
            JsonKind::Array => '[',
            JsonKind::Object => '{',
        }
    }

    fn close(self) -> char {
        match self {
            JsonKind::Array => ']',
            JsonKind::Object => '}',
        }
    }
}

/// Find the first balanced span of the target kind in `text`.
///
/// Returns the exact substring from the opening bracket to its matching
/// close, inclusive. Fails with [`EnrichmentError::NoStructuredDataFound`]
/// when no opening bracket exists or the depth never returns to zero.
pub fn find_balanced_span(text: &str, kind: JsonKind) -> Result<&str> {
    let open = kind.open();
    let close = kind.close();

    let start = text
        .find(open)
        .ok_or(EnrichmentError::NoStructuredDataFound)?;

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            // depth >= 1 here: the scan begins on the opening bracket
            depth -= 1;
            if depth == 0 {
                let end = start + offset + ch.len_utf8();
                return Ok(&text[start..end]);
            }
        }
    }

    Err(EnrichmentError::NoStructuredDataFound)
}

/// Extract and parse the first balanced JSON array in `text`.
///
/// Parse failure of a balanced span surfaces as
/// [`EnrichmentError::InvalidJson`], distinct from "no span found".
pub fn extract_array<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let span = find_balanced_span(text, JsonKind::Array)?;
    serde_json::from_str(span).map_err(Into::into)
}

/// Extract and parse the first balanced JSON object in `text`.
pub fn extract_object<T: DeserializeOwned>(text: &str) -> Result<T> {
    let span = find_balanced_span(text, JsonKind::Object)?;
    serde_json::from_str(span).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_span_with_surrounding_chatter() {
        let text = r#"Sure! [{"a":1}] thanks"#;
        let span = find_balanced_span(text, JsonKind::Array).unwrap();
        assert_eq!(span, r#"[{"a":1}]"#);
    }

    #[test]
    fn test_nested_arrays() {
        let text = "prefix [[1, [2, 3]], [4]] suffix [5]";
        let span = find_balanced_span(text, JsonKind::Array).unwrap();
        assert_eq!(span, "[[1, [2, 3]], [4]]");
    }

    #[test]
    fn test_object_span() {
        let text = "Here is your JSON:\n```json\n{\"name\": \"Tool\", \"tags\": [\"a\"]}\n```";
        let span = find_balanced_span(text, JsonKind::Object).unwrap();
        assert_eq!(span, r#"{"name": "Tool", "tags": ["a"]}"#);
    }

    #[test]
    fn test_brackets_inside_string_literals() {
        let text = r#"noise ["val]ue", "more[", {"k": "]"}] tail"#;
        let span = find_balanced_span(text, JsonKind::Array).unwrap();
        assert_eq!(span, r#"["val]ue", "more[", {"k": "]"}]"#);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let text = r#"[{"quote": "she said \"]\" loudly"}]"#;
        let span = find_balanced_span(text, JsonKind::Array).unwrap();
        assert_eq!(span, text);
    }

    #[test]
    fn test_unbalanced_is_no_structured_data() {
        let err = find_balanced_span("start [1, 2, [3", JsonKind::Array).unwrap_err();
        assert!(matches!(err, EnrichmentError::NoStructuredDataFound));
    }

    #[test]
    fn test_missing_bracket_is_no_structured_data() {
        let err = find_balanced_span("no structure here at all", JsonKind::Array).unwrap_err();
        assert!(matches!(err, EnrichmentError::NoStructuredDataFound));
    }

    #[test]
    fn test_balanced_but_unparseable_is_invalid_json() {
        // Balanced brackets, but not valid JSON
        let err = extract_array::<serde_json::Value>("[1, 2,, 3]").unwrap_err();
        assert!(matches!(err, EnrichmentError::InvalidJson(_)));
    }

    #[test]
    fn test_extract_array_parses_values() {
        let items: Vec<serde_json::Value> =
            extract_array(r#"Found these: [{"name": "A"}, {"name": "B"}] enjoy"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "A");
    }

    #[test]
    fn test_extract_object_skips_leading_chatter() {
        #[derive(serde::Deserialize)]
        struct Named {
            name: String,
        }

        let named: Named = extract_object(r#"The tool is {"name": "Flux"} as requested"#).unwrap();
        assert_eq!(named.name, "Flux");
    }

    #[test]
    fn test_first_span_wins() {
        let span = find_balanced_span("[1] and later [2, 3]", JsonKind::Array).unwrap();
        assert_eq!(span, "[1]");
    }

    proptest! {
        // Any JSON value serde can render must round-trip through the
        // span scanner when wrapped in arbitrary non-bracket chatter.
        #[test]
        fn prop_roundtrip_with_chatter(values in proptest::collection::vec(any::<i64>(), 0..20),
                                       prefix in "[^\\[\\]]{0,40}",
                                       suffix in "[^\\[\\]]{0,40}") {
            let json = serde_json::to_string(&values).unwrap();
            let text = format!("{prefix}{json}{suffix}");

            let parsed: Vec<i64> = extract_array(&text).unwrap();
            prop_assert_eq!(parsed, values);
        }

        // The scanner never panics on arbitrary input.
        #[test]
        fn prop_never_panics(text in ".{0,200}") {
            let _ = find_balanced_span(&text, JsonKind::Array);
            let _ = find_balanced_span(&text, JsonKind::Object);
        }
    }
}
