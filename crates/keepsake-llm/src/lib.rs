//! Keepsake LLM Provider Layer
//!
//! # Architecture
//!
//! This crate owns the wire contract with the Gemini `generateContent` REST
//! API and the `GenerateContent` trait the extraction pipeline calls through.
//!
//! # Providers
//!
//! - `GeminiProvider`: direct REST integration (one request per call, no retry)
//! - `MockProvider`: deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use keepsake_llm::{GenerateContentResponse, MockProvider};
//!
//! let provider = MockProvider::new();
//! provider.push_response(GenerateContentResponse::default());
//! assert_eq!(provider.call_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::{
    Candidate, CandidateContent, Content, FunctionCall, FunctionDeclaration, GeminiProvider,
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, SystemInstruction,
    Tool, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};

/// Errors that can occur during a provider call
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Network or transport failure before an HTTP status was received
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status; the response body is captured verbatim
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Numeric HTTP status code
        status: u16,
        /// Response body text, as returned by the server
        body: String,
    },

    /// The response body could not be decoded into the wire types
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for issuing one structured generation request
///
/// Implementations are stateless across calls: every invocation carries its
/// own model identifier and credential, and nothing is cached between calls.
#[async_trait]
pub trait GenerateContent: Send + Sync {
    /// Issue exactly one `generateContent` request and return the decoded
    /// response. Implementations must not retry on failure.
    async fn generate(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError>;
}

/// A call recorded by [`MockProvider`], for test assertions
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Model identifier the caller resolved
    pub model: String,

    /// Credential the caller resolved
    pub api_key: String,

    /// The full request body
    pub request: GenerateContentRequest,
}

/// Mock provider for deterministic testing
///
/// Returns queued responses without making any network calls and records
/// every request it receives. When the queue is empty it returns an empty
/// response (no candidates), which classifies as "nothing memorable".
///
/// # Examples
///
/// ```
/// use keepsake_llm::{GenerateContentResponse, LlmError, MockProvider};
///
/// let provider = MockProvider::new();
/// provider.push_response(GenerateContentResponse::default());
/// provider.push_error(LlmError::Communication("boom".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<Result<GenerateContentResponse, LlmError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a mock with an empty response queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn push_response(&self, response: GenerateContentResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error
    pub fn push_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Number of generate calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The most recent recorded call, if any
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Clear recorded calls
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl GenerateContent for MockProvider {
    async fn generate(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            api_key: api_key.to_string(),
            request: request.clone(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GenerateContentResponse::default()))
    }
}
