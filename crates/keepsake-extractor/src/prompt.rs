//! Prompt assembly for memory extraction
//!
//! Rendering is a pure function of the window: the same messages always
//! produce the same bytes, so any non-determinism in an attempt comes from
//! the provider, never from prompt assembly.

use keepsake_domain::Message;

/// Fixed instruction block sent with every request
///
/// Defines what counts as memorable, the explicit exclusions, the five
/// categories, and the importance rubric. Most windows contain nothing
/// worth storing; the instructions say so to keep the tool-call rate low.
pub const SYSTEM_INSTRUCTION: &str = "\
You analyze conversations to extract memorable facts about the user.

Only store facts that are:
- Explicitly stated or strongly implied by the USER (not the assistant)
- Worth remembering for future conversations
- Not just conversational filler (\"yeah\", \"okay\", \"tell me more\")
- NEW information not already obvious from context

DO NOT extract:
- The user's name (already known to the system)
- Temporary states like \"user is tired\" or \"user is busy today\"
- Things the assistant said or suggested
- Vague statements with no specific facts

Most conversation windows have NOTHING worth storing. That's normal \u{2014} just respond without calling the tool.

Categories:
- identity: Location, job, family members, age, background (NOT name)
- preference: Likes, dislikes, communication style, explicit requests
- context: Current projects, problems, life events in progress
- relationship: Shared moments, emotional references, inside jokes
- surprise: Unusual or unexpected facts that stand out

Importance scale (1-5):
- 5: Core identity (where they live, what they do, family)
- 4: Important relationships or major life events
- 3: Notable preferences or ongoing situations
- 2: Interesting but not critical details
- 1: Minor details worth noting
";

/// Render a conversation window as a transcript
///
/// Each message becomes `"{ROLE}: {content}"` with the role uppercased,
/// joined by newlines in window order.
///
/// # Examples
///
/// ```
/// use keepsake_domain::Message;
/// use keepsake_extractor::render_transcript;
///
/// let window = [Message::user("I live in Austin")];
/// assert_eq!(render_transcript(&window), "USER: I live in Austin");
/// ```
pub fn render_transcript(window: &[Message]) -> String {
    window
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str().to_uppercase(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap a rendered transcript in the fixed analysis request
pub fn build_user_prompt(transcript: &str) -> String {
    format!(
        "Analyze this conversation for memorable facts:\n\n{}",
        transcript
    )
}
