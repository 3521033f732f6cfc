//! Conversation messages - the input side of extraction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker role of a conversation message
///
/// Serialized lowercase, matching the transcript rendering convention used
/// by the extraction prompt (`USER:`, `ASSISTANT:`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human user
    User,

    /// The assistant
    Assistant,

    /// System-injected content
    System,

    /// Tool or function output surfaced into the conversation
    Tool,
}

impl Role {
    /// Get the role name as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            "tool" => Ok(Role::Tool),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// One turn of conversation
///
/// A conversation window is an ordered slice of messages; order is
/// chronological and meaningful. Messages are immutable once captured.
///
/// # Examples
///
/// ```
/// use keepsake_domain::{Message, Role};
///
/// let msg = Message::user("I live in Austin");
/// assert_eq!(msg.role, Role::User);
/// assert_eq!(msg.content, "I live in Austin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this turn
    pub role: Role,

    /// Verbatim text of the turn
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}
