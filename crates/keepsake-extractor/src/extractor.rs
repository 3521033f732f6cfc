//! Core MemoryExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::observer::{self, ExtractionObserver};
use crate::parser::{self, ParsedResponse};
use crate::prompt;
use crate::tool;
use crate::types::{ExtractionAttempt, ExtractionContext};
use keepsake_domain::{MemoryFact, MemoryStore, Message};
use keepsake_llm::{
    Content, GeminiProvider, GenerateContent, GenerateContentRequest, GenerationConfig,
    SystemInstruction,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Extracts memorable facts from conversation windows
///
/// Holds nothing but the provider, configuration, and an optional
/// observer; every call resolves its own model and credential, so
/// concurrent calls share no mutable state and are never serialized.
pub struct MemoryExtractor<P>
where
    P: GenerateContent,
{
    provider: Arc<P>,
    config: ExtractorConfig,
    observer: Option<Arc<dyn ExtractionObserver>>,
}

impl MemoryExtractor<GeminiProvider> {
    /// Create an extractor against the live Gemini endpoint
    pub fn gemini(config: ExtractorConfig) -> Self {
        Self::new(GeminiProvider::new(), config)
    }
}

impl<P> MemoryExtractor<P>
where
    P: GenerateContent,
{
    /// Create an extractor with an explicit provider
    pub fn new(provider: P, config: ExtractorConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
            observer: None,
        }
    }

    /// Register an observer for per-attempt diagnostics
    pub fn with_observer(mut self, observer: Arc<dyn ExtractionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Extract memorable facts from a conversation window
    ///
    /// Returns the extracted facts; an empty list is the common case and
    /// covers both "nothing memorable" and "provider call failed". The
    /// distinction, along with timing, the rendered prompt, and the raw
    /// response details, is visible only through the registered observer.
    ///
    /// If no credential resolves, no network call is made: the attempt is
    /// reported to the observer as nothing-memorable and the empty list is
    /// returned.
    pub async fn extract(
        &self,
        window: &[Message],
        context: ExtractionContext,
    ) -> Vec<MemoryFact> {
        let start = Instant::now();

        let model = self.config.resolve_model();
        let transcript = prompt::render_transcript(window);

        let Some(api_key) = self.config.resolve_api_key() else {
            warn!("No Gemini API key found for memory extraction");
            let attempt = self.build_attempt(
                ParsedResponse::empty(),
                start.elapsed(),
                model,
                window,
                transcript,
                context,
            );
            observer::dispatch(self.observer.as_ref(), attempt).await;
            return Vec::new();
        };

        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt::build_user_prompt(&transcript))],
            system_instruction: Some(SystemInstruction::text(prompt::SYSTEM_INSTRUCTION)),
            tools: vec![tool::extraction_tool()],
            generation_config: Some(GenerationConfig {
                temperature: self.config.temperature,
            }),
        };

        debug!("Prompt length: {} chars", transcript.len());

        let parsed = match self.provider.generate(&model, &api_key, &request).await {
            Ok(response) => parser::classify_response(&response),
            Err(e) => {
                error!("Memory extraction failed: {}", e);
                ParsedResponse::from_error(e.to_string())
            }
        };

        let duration = start.elapsed();

        if !parsed.facts.is_empty() {
            info!(
                "Extracted {} memories ({}ms)",
                parsed.facts.len(),
                duration.as_millis()
            );
        }

        let facts = parsed.facts.clone();
        let attempt = self.build_attempt(parsed, duration, model, window, transcript, context);
        observer::dispatch(self.observer.as_ref(), attempt).await;

        facts
    }

    /// Extract facts and persist them in one step
    ///
    /// Returns the number of facts stored: 0 without touching the store
    /// when extraction yields nothing, otherwise the batch size after
    /// exactly one `store_batch` call. No deduplication against previous
    /// batches and no serialization of concurrent calls for the same
    /// session.
    pub async fn extract_and_store<S>(
        &self,
        window: &[Message],
        store: &S,
        session_id: Option<&str>,
        turn_number: Option<u32>,
    ) -> Result<usize, ExtractorError>
    where
        S: MemoryStore,
    {
        let context = ExtractionContext {
            session_id: session_id.map(String::from),
            trigger_message_count: Some(window.len()),
            ..Default::default()
        };

        let facts = self.extract(window, context).await;

        if facts.is_empty() {
            return Ok(0);
        }

        store
            .store_batch(&facts, session_id, turn_number)
            .await
            .map_err(|e| ExtractorError::Store(e.to_string()))?;

        Ok(facts.len())
    }

    fn build_attempt(
        &self,
        parsed: ParsedResponse,
        duration: std::time::Duration,
        model: String,
        window: &[Message],
        transcript: String,
        context: ExtractionContext,
    ) -> ExtractionAttempt {
        ExtractionAttempt {
            facts: parsed.facts,
            status: parsed.status,
            duration,
            model,
            window: window.to_vec(),
            prompt: transcript,
            tool_invoked: parsed.tool_invoked,
            raw_text: parsed.raw_text,
            finish_reason: parsed.finish_reason,
            error_message: parsed.error_message,
            context,
        }
    }
}
