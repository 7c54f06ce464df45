//! Response normalization: pull one reply string out of whatever the backend sent.
//!
//! Backends disagree on where the generated text lives. Each known shape is an
//! [`ExtractStrategy`]; strategies run in priority order and the first one that
//! finds a non-null value wins. The order is an empirical compatibility list:
//!
//! 1. `response` (generate-style backends)
//! 2. `reply`
//! 3. `output_text`
//! 4. `result.output_text`
//! 5. `choices[0].text`
//! 6. `output[0].content.parts[0]`
//!
//! Bodies that are not a JSON object are shown verbatim when they are short enough.

use serde_json::Value;

use crate::types::{FallbackReason, GatewayResult};

/// Raw bodies at or above this many characters are not shown.
pub const MAX_RAW_TEXT_CHARS: usize = 2000;

/// Pure probe from a parsed payload to the value holding the reply, if present.
pub type ExtractStrategy = fn(&Value) -> Option<&Value>;

fn top_level_response(v: &Value) -> Option<&Value> {
    v.get("response")
}

fn top_level_reply(v: &Value) -> Option<&Value> {
    v.get("reply")
}

fn top_level_output_text(v: &Value) -> Option<&Value> {
    v.get("output_text")
}

fn nested_result_output_text(v: &Value) -> Option<&Value> {
    v.get("result")?.get("output_text")
}

fn first_choice_text(v: &Value) -> Option<&Value> {
    v.get("choices")?.get(0)?.get("text")
}

fn first_output_content_part(v: &Value) -> Option<&Value> {
    v.get("output")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .get(0)
}

/// Built-in strategies, highest priority first.
pub fn default_strategies() -> Vec<(&'static str, ExtractStrategy)> {
    vec![
        ("response", top_level_response as ExtractStrategy),
        ("reply", top_level_reply as ExtractStrategy),
        ("output_text", top_level_output_text as ExtractStrategy),
        ("result.output_text", nested_result_output_text as ExtractStrategy),
        ("choices[0].text", first_choice_text as ExtractStrategy),
        ("output[0].content.parts[0]", first_output_content_part as ExtractStrategy),
    ]
}

/// Render a JSON value as display text. Strings are used as-is.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Ordered strategy list plus the raw-text rule.
#[derive(Clone)]
pub struct ResponseNormalizer {
    strategies: Vec<(&'static str, ExtractStrategy)>,
    max_raw_chars: usize,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
            max_raw_chars: MAX_RAW_TEXT_CHARS,
        }
    }
}

impl std::fmt::Debug for ResponseNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseNormalizer")
            .field(
                "strategies",
                &self.strategies.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            )
            .field("max_raw_chars", &self.max_raw_chars)
            .finish()
    }
}

impl ResponseNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy; it runs after every strategy already registered.
    pub fn with_strategy(mut self, name: &'static str, strategy: ExtractStrategy) -> Self {
        self.strategies.push((name, strategy));
        self
    }

    pub fn with_max_raw_chars(mut self, max: usize) -> Self {
        self.max_raw_chars = max;
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|(name, _)| *name).collect()
    }

    /// Find reply text in a response body.
    ///
    /// Returns the text and the name of the rule that produced it. Blank text
    /// counts as not found.
    pub fn extract(&self, body: &str) -> Option<(String, &'static str)> {
        let found = match serde_json::from_str::<Value>(body) {
            Ok(parsed) if parsed.is_object() => {
                self.strategies.iter().find_map(|(name, strategy)| {
                    strategy(&parsed)
                        .filter(|v| !v.is_null())
                        .map(|v| (render(v), *name))
                })
            }
            // Not a structured object: plain text, or a bare JSON scalar/array.
            _ => {
                let short = body.chars().count() < self.max_raw_chars;
                (!body.is_empty() && short).then(|| (body.to_string(), "raw_text"))
            }
        };

        found.filter(|(text, _)| !text.trim().is_empty())
    }

    /// Turn an HTTP status and body into a caller-safe result.
    pub fn normalize(&self, status: u16, body: &str) -> GatewayResult {
        if let Some((text, _)) = self.extract(body) {
            return GatewayResult::Reply(text);
        }
        if (200..300).contains(&status) {
            GatewayResult::fallback(FallbackReason::NoContent)
        } else {
            GatewayResult::fallback(FallbackReason::BackendError { status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NO_CONTENT_TEXT;

    fn reply(body: &str) -> Option<String> {
        ResponseNormalizer::new().extract(body).map(|(text, _)| text)
    }

    #[test]
    fn test_generate_shape() {
        let body = r#"{"model":"gemma2:9b","response":"hello","done":true}"#;
        assert_eq!(reply(body).as_deref(), Some("hello"));
    }

    #[test]
    fn test_each_shape_is_recognized() {
        let cases = [
            (r#"{"reply":"r"}"#, "reply"),
            (r#"{"output_text":"o"}"#, "output_text"),
            (r#"{"result":{"output_text":"n"}}"#, "result.output_text"),
            (r#"{"choices":[{"text":"hi there"}]}"#, "choices[0].text"),
            (
                r#"{"output":[{"content":{"parts":["deep"]}}]}"#,
                "output[0].content.parts[0]",
            ),
        ];
        let normalizer = ResponseNormalizer::new();
        for (body, expected) in cases {
            let (_, source) = normalizer.extract(body).expect(body);
            assert_eq!(source, expected);
        }
    }

    #[test]
    fn test_priority_order() {
        let body = r#"{"choices":[{"text":"third"}],"reply":"second","response":"first"}"#;
        assert_eq!(reply(body).as_deref(), Some("first"));

        let body = r#"{"response":null,"reply":"second"}"#;
        assert_eq!(reply(body).as_deref(), Some("second"));
    }

    #[test]
    fn test_first_present_value_wins_even_if_blank() {
        let body = r#"{"response":"   ","reply":"ignored"}"#;
        assert_eq!(reply(body), None);
    }

    #[test]
    fn test_output_must_be_array() {
        let body = r#"{"output":{"content":{"parts":["x"]}}}"#;
        assert_eq!(reply(body), None);
    }

    #[test]
    fn test_non_string_values_are_rendered() {
        assert_eq!(reply(r#"{"response":42}"#).as_deref(), Some("42"));
        assert_eq!(reply(r#"{"reply":true}"#).as_deref(), Some("true"));
        assert_eq!(
            reply(r#"{"response":{"a":1}}"#).as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(reply("Just some text").as_deref(), Some("Just some text"));
        assert_eq!(reply(""), None);
        assert_eq!(reply("  \n "), None);
    }

    #[test]
    fn test_long_plain_text_is_rejected() {
        let long = "x".repeat(MAX_RAW_TEXT_CHARS);
        assert_eq!(reply(&long), None);
        let short = "x".repeat(MAX_RAW_TEXT_CHARS - 1);
        assert_eq!(reply(&short), Some(short));
    }

    #[test]
    fn test_bare_json_scalar_is_raw_text() {
        assert_eq!(reply("42").as_deref(), Some("42"));
        assert_eq!(reply(r#""quoted""#).as_deref(), Some(r#""quoted""#));
    }

    #[test]
    fn test_json_without_known_fields_is_not_raw_text() {
        assert_eq!(reply("{}"), None);
        assert_eq!(reply(r#"{"error":"model not found"}"#), None);
    }

    #[test]
    fn test_normalize_statuses() {
        let normalizer = ResponseNormalizer::new();
        assert_eq!(
            normalizer.normalize(200, r#"{"response":"hello"}"#),
            GatewayResult::Reply("hello".into())
        );
        assert_eq!(normalizer.normalize(200, "{}").text(), NO_CONTENT_TEXT);
        assert_eq!(
            normalizer.normalize(404, r#"{"error":"model not found"}"#).reason(),
            Some(FallbackReason::BackendError { status: 404 })
        );
    }

    #[test]
    fn test_custom_strategy_runs_last() {
        fn message_content(v: &Value) -> Option<&Value> {
            v.get("message")?.get("content")
        }
        let normalizer =
            ResponseNormalizer::new().with_strategy("message.content", message_content);
        assert_eq!(normalizer.strategy_names().last(), Some(&"message.content"));

        let (text, source) = normalizer
            .extract(r#"{"message":{"role":"assistant","content":"chat shape"}}"#)
            .unwrap();
        assert_eq!(text, "chat shape");
        assert_eq!(source, "message.content");
    }
}
