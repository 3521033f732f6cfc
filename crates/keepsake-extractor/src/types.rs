//! Result and diagnostic types for extraction

use keepsake_domain::{MemoryFact, Message};
use std::time::Duration;

/// Outcome classification of one extraction attempt
///
/// `Error` is reserved for failures before or during the provider call;
/// a response that merely declines to extract is `NoMemories`, never
/// `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionStatus {
    /// At least one fact was extracted
    Success,

    /// Nothing memorable; the common case
    NoMemories,

    /// The provider call failed before a response could be classified
    Error,
}

impl ExtractionStatus {
    /// Get the status as a snake_case string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Success => "success",
            ExtractionStatus::NoMemories => "no_memories",
            ExtractionStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity context attached to an attempt for diagnostics
///
/// All fields are optional and flow through untouched; the pipeline never
/// interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionContext {
    /// User the conversation belongs to
    pub user_id: Option<String>,

    /// Agent participating in the conversation
    pub agent_id: Option<String>,

    /// Conversation session
    pub session_id: Option<String>,

    /// Window length at the moment extraction was triggered
    pub trigger_message_count: Option<usize>,
}

/// Complete diagnostic record of one extraction attempt
///
/// Constructed once per call, handed by value to the observer, then
/// dropped. The core never persists it; callers who ignore the observer
/// only ever see the returned fact list.
#[derive(Debug, Clone)]
pub struct ExtractionAttempt {
    /// Extracted facts (empty if nothing memorable)
    pub facts: Vec<MemoryFact>,

    /// Outcome classification
    pub status: ExtractionStatus,

    /// Wall-clock time the attempt took
    pub duration: Duration,

    /// Model identifier resolved for this call
    pub model: String,

    /// The input conversation window
    pub window: Vec<Message>,

    /// Rendered transcript submitted for analysis
    pub prompt: String,

    /// Whether the model invoked the `store_memories` tool
    pub tool_invoked: bool,

    /// Free-text fragment from the response, if any
    pub raw_text: Option<String>,

    /// Provider finish reason, if reported
    pub finish_reason: Option<String>,

    /// Failure message when status is `Error`
    pub error_message: Option<String>,

    /// Caller-supplied identity context
    pub context: ExtractionContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(ExtractionStatus::Success.as_str(), "success");
        assert_eq!(ExtractionStatus::NoMemories.as_str(), "no_memories");
        assert_eq!(ExtractionStatus::Error.as_str(), "error");
    }

    #[test]
    fn test_context_default_is_empty() {
        let context = ExtractionContext::default();
        assert_eq!(context.user_id, None);
        assert_eq!(context.trigger_message_count, None);
    }
}
