//! Extract memories from a canned conversation window and store them locally.
//!
//! Requires `KEEPSAKE_GEMINI_API_KEY` or `GOOGLE_API_KEY` in the environment;
//! without a key the run completes with nothing stored.
//!
//! ```sh
//! cargo run --example extract
//! ```

use async_trait::async_trait;
use keepsake_domain::{MemoryStore, Message};
use keepsake_extractor::{
    ExtractionAttempt, ExtractionObserver, ExtractorConfig, MemoryExtractor,
};
use keepsake_store::LocalMemory;
use std::sync::Arc;
use tracing::info;

/// Logs the diagnostic record of every attempt
struct LoggingObserver;

#[async_trait]
impl ExtractionObserver for LoggingObserver {
    async fn on_complete(&self, attempt: ExtractionAttempt) -> anyhow::Result<()> {
        info!(
            "attempt: status={} model={} facts={} tool_invoked={} duration={}ms",
            attempt.status,
            attempt.model,
            attempt.facts.len(),
            attempt.tool_invoked,
            attempt.duration.as_millis()
        );
        if let Some(error) = &attempt.error_message {
            info!("attempt error: {}", error);
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store = LocalMemory::in_memory()?;
    let extractor = MemoryExtractor::gemini(ExtractorConfig::default())
        .with_observer(Arc::new(LoggingObserver));

    let window = vec![
        Message::user("I just moved to Austin for a new job at a biotech startup"),
        Message::assistant("Congratulations! How are you finding the city?"),
        Message::user("Loving it, though my brother Mike keeps telling me to move back"),
    ];

    let stored = extractor
        .extract_and_store(&window, &store, Some("demo-session"), Some(1))
        .await?;
    println!("Stored {} memories", stored);

    let stats = store.get_stats().await?;
    println!("Store now holds {} memories", stats.total_memories);
    for (category, count) in &stats.by_category {
        println!("  {}: {}", category, count);
    }

    store.cleanup().await?;
    Ok(())
}
