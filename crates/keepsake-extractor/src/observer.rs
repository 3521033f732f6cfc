//! Observer dispatch for extraction diagnostics
//!
//! The observer is the only channel through which callers can see the full
//! diagnostic record of an attempt; the fact list returned by `extract`
//! deliberately carries no failure detail.

use crate::types::ExtractionAttempt;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Receives the diagnostic record of every extraction attempt
///
/// Invoked exactly once per call, on every path: credential-skip, success,
/// no-memories, and error. A synchronous observer simply returns without
/// awaiting anything; the dispatcher awaits uniformly either way.
///
/// Plain closures of type `Fn(ExtractionAttempt) -> anyhow::Result<()>`
/// implement this trait directly.
#[async_trait]
pub trait ExtractionObserver: Send + Sync {
    /// Consume the attempt record
    ///
    /// Errors are logged by the dispatcher and never propagate to the
    /// extraction caller.
    async fn on_complete(&self, attempt: ExtractionAttempt) -> anyhow::Result<()>;
}

#[async_trait]
impl<F> ExtractionObserver for F
where
    F: Fn(ExtractionAttempt) -> anyhow::Result<()> + Send + Sync,
{
    async fn on_complete(&self, attempt: ExtractionAttempt) -> anyhow::Result<()> {
        (self)(attempt)
    }
}

/// Hand the attempt to the observer, if one is registered
///
/// Sequenced after classification and before any storage call. Observer
/// failures are isolated here: logged at warn, never returned.
pub(crate) async fn dispatch(
    observer: Option<&Arc<dyn ExtractionObserver>>,
    attempt: ExtractionAttempt,
) {
    if let Some(observer) = observer {
        if let Err(e) = observer.on_complete(attempt).await {
            warn!("Extraction observer failed: {}", e);
        }
    }
}
