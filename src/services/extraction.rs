//! Locating a JSON object inside free-form model output.
//!
//! Models asked for "pure JSON" still wrap it in prose or code fences often
//! enough that the service has to dig the object out. Candidates are tried in
//! this order and the first one that parses as a JSON object wins:
//!
//! 1. the body of each fenced code block,
//! 2. each balanced `{ ... }` span, left to right (string aware),
//! 3. the span from the leftmost `{` to the rightmost `}`.

use crate::error::{PlannerError, Result};
use serde_json::Value;
use tracing::{debug, warn};

const FENCE: &str = "```";
const MAX_LOGGED_CHARS: usize = 2000;

/// Where in the model output the object was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    Fenced,
    Balanced,
    Greedy,
}

/// Extract the first JSON object embedded in `text`.
///
/// Fails with the fixed extraction message; the raw text is only logged.
pub fn extract_json_object(text: &str) -> Result<Value> {
    match locate_json_object(text) {
        Some((value, source)) => {
            debug!(target: "itinerary::extract", ?source, "located JSON object in model output");
            Ok(value)
        }
        None => {
            warn!(
                target: "itinerary::extract",
                chars = text.chars().count(),
                raw = %truncate_for_log(text),
                "no parseable JSON object in model output"
            );
            Err(PlannerError::extraction())
        }
    }
}

/// Find and parse the embedded object, reporting which strategy matched.
pub fn locate_json_object(text: &str) -> Option<(Value, ExtractionSource)> {
    fenced_blocks(text)
        .map(|span| (span, ExtractionSource::Fenced))
        .chain(BalancedObjects::new(text).map(|span| (span, ExtractionSource::Balanced)))
        .chain(greedy_span(text).map(|span| (span, ExtractionSource::Greedy)))
        .find_map(|(span, source)| parse_object(span).map(|value| (value, source)))
}

fn parse_object(candidate: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) if value.is_object() => Some(value),
        _ => None,
    }
}

/// Leftmost `{` through rightmost `}`.
///
/// Breaks when the text holds any other brace-delimited fragment, which is
/// why it only runs after the balanced scan.
pub fn greedy_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Bodies of fenced code blocks, with any language tag stripped.
pub fn fenced_blocks(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || loop {
        let open = rest.find(FENCE)?;
        let after_open = &rest[open + FENCE.len()..];
        // The info string (e.g. `json`) runs to the end of the opening line.
        let body_start = match after_open.find('\n') {
            Some(newline) if !after_open[..newline].contains('{') => newline + 1,
            _ => 0,
        };
        let body = &after_open[body_start..];
        let close = body.find(FENCE)?;
        rest = &body[close + FENCE.len()..];

        let inner = body[..close].trim();
        if inner.starts_with('{') {
            return Some(inner);
        }
    })
}

/// Iterator over balanced `{ ... }` spans, in order of their opening brace.
///
/// Every unmatched `{` rescans to the end of the text, so input made of
/// unclosed braces costs O(n²). String state depends on where a scan starts,
/// which rules out sharing one pass between starts. Model output is bounded by
/// `maxOutputTokens`, which keeps the worst case small.
pub struct BalancedObjects<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> BalancedObjects<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }
}

impl<'a> Iterator for BalancedObjects<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.cursor < self.text.len() {
            let start = self.cursor + self.text[self.cursor..].find('{')?;
            self.cursor = start + 1;
            if let Some(end) = matching_brace(self.text.as_bytes(), start) {
                return Some(&self.text[start..=end]);
            }
        }
        None
    }
}

/// Index of the `}` closing the `{` at `start`, ignoring braces in strings.
///
/// Scanning bytes is safe for UTF-8 input because every byte compared here
/// is ASCII and never occurs inside a multi-byte sequence.
fn matching_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}

fn truncate_for_log(text: &str) -> String {
    if text.chars().count() <= MAX_LOGGED_CHARS {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_LOGGED_CHARS).collect();
    clipped.push_str("...");
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXTRACTION_FAILED_MESSAGE;
    use serde_json::json;

    const PAYLOAD: &str = r#"{"highlights": {"topAttractions": []}, "note": "use {curly} braces"}"#;

    fn direct() -> Value {
        serde_json::from_str(PAYLOAD).unwrap()
    }

    #[test]
    fn test_bare_object() {
        assert_eq!(extract_json_object(PAYLOAD).unwrap(), direct());
    }

    #[test]
    fn test_object_wrapped_in_prose() {
        let text = format!("Sure! Here is your plan:\n\n{}\n\nEnjoy the trip.", PAYLOAD);
        assert_eq!(extract_json_object(&text).unwrap(), direct());
    }

    #[test]
    fn test_object_in_json_fence() {
        let text = format!("```json\n{}\n```", PAYLOAD);
        let (value, source) = locate_json_object(&text).unwrap();
        assert_eq!(value, direct());
        assert_eq!(source, ExtractionSource::Fenced);
    }

    #[test]
    fn test_object_in_bare_fence_with_trailing_prose() {
        let text = format!("Plan below\n```\n{}\n```\nLet me know if you want changes.", PAYLOAD);
        assert_eq!(extract_json_object(&text).unwrap(), direct());
    }

    #[test]
    fn test_brace_fragment_before_payload_is_skipped() {
        // The greedy span would start at "{like this}" and fail to parse.
        let text = format!("I will answer in the shape {{like this}}.\n{}", PAYLOAD);
        let (value, source) = locate_json_object(&text).unwrap();
        assert_eq!(value, direct());
        assert_eq!(source, ExtractionSource::Balanced);
    }

    #[test]
    fn test_brace_fragment_after_payload_is_ignored() {
        let text = format!("{}\nP.S. budget tips are in {{tips}}.", PAYLOAD);
        assert_eq!(extract_json_object(&text).unwrap(), direct());
        assert!(serde_json::from_str::<Value>(greedy_span(&text).unwrap()).is_err());
    }

    #[test]
    fn test_braces_and_escaped_quotes_inside_strings() {
        let text = r#"prefix {"a": "close } early \" {", "b": {"c": 1}} suffix"#;
        assert_eq!(
            extract_json_object(text).unwrap(),
            json!({"a": "close } early \" {", "b": {"c": 1}})
        );
    }

    #[test]
    fn test_multibyte_text_around_payload() {
        let text = "Voilà — ₹ prices follow: {\"city\": \"Pondichéry\", \"total\": 20400} ✈️";
        assert_eq!(
            extract_json_object(text).unwrap(),
            json!({"city": "Pondichéry", "total": 20400})
        );
    }

    #[test]
    fn test_no_braces_fails_with_fixed_message() {
        let err = extract_json_object("I'm sorry, I can't help with that.").unwrap_err();
        assert_eq!(err.to_string(), format!("Extraction error: {}", EXTRACTION_FAILED_MESSAGE));
    }

    #[test]
    fn test_truncated_object_fails_without_leaking_text() {
        let raw = r#"{"highlights": {"topAttractions": [{"name": "SECRET-MARKER""#;
        let err = extract_json_object(raw).unwrap_err();
        assert!(!err.client_message().contains("SECRET-MARKER"));
        assert_eq!(err.client_message(), EXTRACTION_FAILED_MESSAGE);
    }

    #[test]
    fn test_arrays_are_not_objects() {
        assert!(locate_json_object("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_balanced_scan_yields_outer_then_inner() {
        let spans: Vec<&str> = BalancedObjects::new("x {\"a\": {\"b\": 1}} y").collect();
        assert_eq!(spans, vec!["{\"a\": {\"b\": 1}}", "{\"b\": 1}"]);
    }

    #[test]
    fn test_unbalanced_close_brace() {
        assert_eq!(matching_brace(b"{}}", 0), Some(1));
        assert_eq!(matching_brace(b"{{}", 0), None);
    }

    #[test]
    fn test_object_after_many_unclosed_braces() {
        let text = format!("{}{{\"a\": 1}}", "{ ".repeat(2000));
        let (value, source) = locate_json_object(&text).unwrap();
        assert_eq!(value, json!({"a": 1}));
        assert_eq!(source, ExtractionSource::Balanced);
    }

    #[test]
    fn test_log_truncation() {
        let long = "a".repeat(MAX_LOGGED_CHARS + 10);
        let clipped = truncate_for_log(&long);
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), MAX_LOGGED_CHARS + 3);
    }
}
