//! Classify provider responses and coerce reported facts
//!
//! The provider's structured output is untrusted input: every field of
//! every reported entry is coerced independently with a default instead of
//! rejecting the entry, and entries that are not key/value shaped are
//! skipped. Coercion never fails.

use crate::tool::TOOL_NAME;
use crate::types::ExtractionStatus;
use keepsake_domain::{MemoryCategory, MemoryFact};
use keepsake_llm::GenerateContentResponse;
use serde_json::Value;
use tracing::debug;

/// Importance applied when the entry omits it or reports a non-number
const DEFAULT_IMPORTANCE: i64 = 3;

/// Outcome of classifying one provider response
#[derive(Debug, Clone)]
pub(crate) struct ParsedResponse {
    /// Coerced facts, in the order the tool call reported them
    pub facts: Vec<MemoryFact>,

    /// Status derived from the facts (never `Error`; see `from_error`)
    pub status: ExtractionStatus,

    /// Whether a `store_memories` call was present
    pub tool_invoked: bool,

    /// Last free-text fragment found among the parts
    pub raw_text: Option<String>,

    /// Finish reason of the first candidate
    pub finish_reason: Option<String>,

    /// Failure message; only set by `from_error`
    pub error_message: Option<String>,
}

impl ParsedResponse {
    /// Classification of an attempt that produced nothing: no facts, no
    /// tool call, no response details. Also used for the credential-skip
    /// path, where no request is ever issued.
    pub(crate) fn empty() -> Self {
        Self {
            facts: Vec::new(),
            status: ExtractionStatus::NoMemories,
            tool_invoked: false,
            raw_text: None,
            finish_reason: None,
            error_message: None,
        }
    }

    /// Classification of an attempt that failed before or during the
    /// provider call. This is the only path that yields `Error` status.
    pub fn from_error(message: String) -> Self {
        Self {
            status: ExtractionStatus::Error,
            error_message: Some(message),
            ..Self::empty()
        }
    }
}

/// Classify a provider response into status and facts
///
/// Precedence, each condition short-circuiting the rest:
/// 1. no candidates: nothing memorable
/// 2. candidate without content parts: nothing memorable
/// 3. scan all parts for text and a `store_memories` call; coerce each
///    entry of its `memories` array
/// 4. at least one coerced fact means success, otherwise nothing memorable
///
/// A response that declines to invoke the tool is never an error.
pub(crate) fn classify_response(response: &GenerateContentResponse) -> ParsedResponse {
    let Some(candidate) = response.candidates.first() else {
        return ParsedResponse::empty();
    };

    let finish_reason = candidate.finish_reason.clone();

    let parts = candidate
        .content
        .as_ref()
        .map(|c| c.parts.as_slice())
        .unwrap_or(&[]);

    if parts.is_empty() {
        return ParsedResponse {
            finish_reason,
            ..ParsedResponse::empty()
        };
    }

    let mut facts = Vec::new();
    let mut tool_invoked = false;
    let mut raw_text = None;

    for part in parts {
        if let Some(text) = &part.text {
            raw_text = Some(text.clone());
        }

        if let Some(call) = &part.function_call {
            if call.name == TOOL_NAME {
                tool_invoked = true;

                let entries = call
                    .args
                    .get("memories")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);

                for (idx, entry) in entries.iter().enumerate() {
                    match coerce_fact(entry) {
                        Some(fact) => facts.push(fact),
                        None => debug!("Skipping non-object memory entry {}", idx),
                    }
                }
            }
        }
    }

    let status = if facts.is_empty() {
        ExtractionStatus::NoMemories
    } else {
        ExtractionStatus::Success
    };

    ParsedResponse {
        facts,
        status,
        tool_invoked,
        raw_text,
        finish_reason,
        error_message: None,
    }
}

/// Coerce one reported entry into a fact
///
/// Returns `None` only for entries that are not key/value structures.
/// Field defaults: content empty, category `context`, importance 3.
fn coerce_fact(entry: &Value) -> Option<MemoryFact> {
    let obj = entry.as_object()?;

    let content = match obj.get("content") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .and_then(MemoryCategory::parse)
        .unwrap_or_default();

    let importance = obj
        .get("importance")
        .map(coerce_importance)
        .unwrap_or(DEFAULT_IMPORTANCE);

    Some(MemoryFact {
        content,
        category,
        importance,
    })
}

/// Integer coercion: i64 as-is, floats truncated, numeric strings parsed,
/// anything else gets the default. Deliberately unclamped.
fn coerce_importance(value: &Value) -> i64 {
    if let Some(i) = value.as_i64() {
        i
    } else if let Some(f) = value.as_f64() {
        f as i64
    } else if let Some(s) = value.as_str() {
        s.trim().parse().unwrap_or(DEFAULT_IMPORTANCE)
    } else {
        DEFAULT_IMPORTANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_llm::{Candidate, CandidateContent, FunctionCall, Part};
    use serde_json::json;

    fn response_with_parts(parts: Vec<Part>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(CandidateContent { parts, role: None }),
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }

    fn tool_call_part(memories: Value) -> Part {
        Part {
            text: None,
            function_call: Some(FunctionCall {
                name: TOOL_NAME.to_string(),
                args: json!({ "memories": memories }),
            }),
        }
    }

    #[test]
    fn test_no_candidates_is_no_memories() {
        let parsed = classify_response(&GenerateContentResponse::default());
        assert_eq!(parsed.status, ExtractionStatus::NoMemories);
        assert!(parsed.facts.is_empty());
        assert!(!parsed.tool_invoked);
    }

    #[test]
    fn test_candidate_without_parts_is_no_memories() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: None,
                finish_reason: Some("MAX_TOKENS".to_string()),
            }],
        };

        let parsed = classify_response(&response);
        assert_eq!(parsed.status, ExtractionStatus::NoMemories);
        assert_eq!(parsed.finish_reason.as_deref(), Some("MAX_TOKENS"));
    }

    #[test]
    fn test_text_only_response_is_no_memories() {
        let parsed = classify_response(&response_with_parts(vec![Part::text("Nothing here.")]));
        assert_eq!(parsed.status, ExtractionStatus::NoMemories);
        assert_eq!(parsed.raw_text.as_deref(), Some("Nothing here."));
        assert!(!parsed.tool_invoked);
    }

    #[test]
    fn test_well_formed_tool_call_yields_facts() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": "User lives in Austin", "category": "identity", "importance": 5},
            {"content": "User dislikes cilantro", "category": "preference", "importance": 2}
        ]))]));

        assert_eq!(parsed.status, ExtractionStatus::Success);
        assert!(parsed.tool_invoked);
        assert_eq!(parsed.facts.len(), 2);
        assert_eq!(parsed.facts[0].content, "User lives in Austin");
        assert_eq!(parsed.facts[0].category, MemoryCategory::Identity);
        assert_eq!(parsed.facts[0].importance, 5);
        assert_eq!(parsed.facts[1].category, MemoryCategory::Preference);
    }

    #[test]
    fn test_tool_call_with_empty_array_is_no_memories() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([]))]));
        assert_eq!(parsed.status, ExtractionStatus::NoMemories);
        assert!(parsed.tool_invoked);
        assert!(parsed.facts.is_empty());
    }

    #[test]
    fn test_differently_named_call_is_ignored() {
        let part = Part {
            text: None,
            function_call: Some(FunctionCall {
                name: "delete_memories".to_string(),
                args: json!({ "memories": [{"content": "x"}] }),
            }),
        };

        let parsed = classify_response(&response_with_parts(vec![part]));
        assert_eq!(parsed.status, ExtractionStatus::NoMemories);
        assert!(!parsed.tool_invoked);
    }

    #[test]
    fn test_text_alongside_tool_call_is_captured() {
        let parsed = classify_response(&response_with_parts(vec![
            Part::text("Storing one fact."),
            tool_call_part(json!([
                {"content": "User plays bass", "category": "context", "importance": 3}
            ])),
        ]));

        assert_eq!(parsed.status, ExtractionStatus::Success);
        assert_eq!(parsed.raw_text.as_deref(), Some("Storing one fact."));
        assert!(parsed.tool_invoked);
    }

    #[test]
    fn test_missing_category_defaults_to_context() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": "User is training for a marathon", "importance": 4}
        ]))]));

        assert_eq!(parsed.facts[0].category, MemoryCategory::Context);
    }

    #[test]
    fn test_unknown_category_defaults_to_context() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": "x", "category": "mood", "importance": 1}
        ]))]));

        assert_eq!(parsed.facts[0].category, MemoryCategory::Context);
    }

    #[test]
    fn test_missing_importance_defaults_to_three() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": "x", "category": "identity"}
        ]))]));

        assert_eq!(parsed.facts[0].importance, 3);
    }

    #[test]
    fn test_non_numeric_importance_defaults_to_three() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": "x", "category": "identity", "importance": "very"},
            {"content": "y", "category": "identity", "importance": null},
            {"content": "z", "category": "identity", "importance": [5]}
        ]))]));

        assert_eq!(parsed.facts.len(), 3);
        assert!(parsed.facts.iter().all(|f| f.importance == 3));
    }

    #[test]
    fn test_numeric_string_importance_parses() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": "x", "category": "identity", "importance": "4"}
        ]))]));

        assert_eq!(parsed.facts[0].importance, 4);
    }

    #[test]
    fn test_float_importance_truncates() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": "x", "category": "identity", "importance": 4.9}
        ]))]));

        assert_eq!(parsed.facts[0].importance, 4);
    }

    #[test]
    fn test_importance_is_unclamped() {
        // The schema documents 1-5; nothing enforces it
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": "x", "category": "surprise", "importance": 99},
            {"content": "y", "category": "surprise", "importance": -2}
        ]))]));

        assert_eq!(parsed.facts[0].importance, 99);
        assert_eq!(parsed.facts[1].importance, -2);
    }

    #[test]
    fn test_missing_content_defaults_to_empty() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"category": "identity", "importance": 5}
        ]))]));

        assert_eq!(parsed.facts[0].content, "");
    }

    #[test]
    fn test_non_string_content_is_rendered_to_text() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            {"content": 42, "category": "identity", "importance": 1}
        ]))]));

        assert_eq!(parsed.facts[0].content, "42");
    }

    #[test]
    fn test_non_object_entries_are_skipped_silently() {
        let parsed = classify_response(&response_with_parts(vec![tool_call_part(json!([
            "just a string",
            17,
            {"content": "User has a greyhound", "category": "identity", "importance": 3}
        ]))]));

        assert_eq!(parsed.facts.len(), 1);
        assert_eq!(parsed.facts[0].content, "User has a greyhound");
        assert_eq!(parsed.status, ExtractionStatus::Success);
    }

    #[test]
    fn test_all_entries_malformed_is_no_memories() {
        let parsed =
            classify_response(&response_with_parts(vec![tool_call_part(json!([1, 2, "x"]))]));

        assert!(parsed.tool_invoked);
        assert!(parsed.facts.is_empty());
        assert_eq!(parsed.status, ExtractionStatus::NoMemories);
    }

    #[test]
    fn test_missing_memories_argument_is_no_memories() {
        let part = Part {
            text: None,
            function_call: Some(FunctionCall {
                name: TOOL_NAME.to_string(),
                args: json!({}),
            }),
        };

        let parsed = classify_response(&response_with_parts(vec![part]));
        assert!(parsed.tool_invoked);
        assert_eq!(parsed.status, ExtractionStatus::NoMemories);
    }

    #[test]
    fn test_from_error_is_the_only_error_path() {
        let parsed = ParsedResponse::from_error("HTTP 500: boom".to_string());
        assert_eq!(parsed.status, ExtractionStatus::Error);
        assert_eq!(parsed.error_message.as_deref(), Some("HTTP 500: boom"));
        assert!(parsed.facts.is_empty());
    }
}
