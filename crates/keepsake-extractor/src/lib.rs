//! Keepsake Extractor
//!
//! Extracts durable, memorable facts about a user from a rolling window of
//! conversation turns, using Gemini's structured tool calling, and hands
//! validated facts to a persistence layer for later recall.
//!
//! # Architecture
//!
//! ```text
//! Window → Prompt + Tool Contract → Gemini → Classifier → (Observer, Store)
//! ```
//!
//! # Key Behavior
//!
//! - **Declining is normal**: 70-80% of windows contain nothing memorable;
//!   the model is told not to call the tool in that case, and an empty
//!   result is the expected common outcome, never an error
//! - **Defensive coercion**: every field of every reported fact is coerced
//!   independently with a default; malformed entries are dropped, never
//!   fatal
//! - **Opaque returns, rich diagnostics**: `extract` returns only the fact
//!   list; status, timing, the rendered prompt, and failure detail reach
//!   the caller exclusively through the optional observer
//! - **One request per attempt**: no retry, no deduplication, no
//!   cross-call state
//!
//! # Example Usage
//!
//! ```no_run
//! use keepsake_domain::Message;
//! use keepsake_extractor::{ExtractionContext, ExtractorConfig, MemoryExtractor};
//!
//! # async fn example() {
//! // Credential resolved from KEEPSAKE_GEMINI_API_KEY or GOOGLE_API_KEY
//! let extractor = MemoryExtractor::gemini(ExtractorConfig::default());
//!
//! let window = vec![
//!     Message::user("I just moved to Austin for a new job at a biotech startup"),
//!     Message::assistant("Congratulations on the move!"),
//! ];
//!
//! let facts = extractor.extract(&window, ExtractionContext::default()).await;
//! for fact in &facts {
//!     println!("[{}] {} (importance {})", fact.category, fact.content, fact.importance);
//! }
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod observer;
mod parser;
mod prompt;
mod tool;
mod types;


pub use config::{
    ExtractorConfig, API_KEY_ENV, DEFAULT_MODEL, MODEL_ENV, SHARED_API_KEY_ENV,
};
pub use error::ExtractorError;
pub use extractor::MemoryExtractor;
pub use observer::ExtractionObserver;
pub use prompt::{build_user_prompt, render_transcript, SYSTEM_INSTRUCTION};
pub use tool::{store_memories_declaration, TOOL_NAME};
pub use types::{ExtractionAttempt, ExtractionContext, ExtractionStatus};
