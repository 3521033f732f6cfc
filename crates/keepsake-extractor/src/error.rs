//! Error types for the extraction pipeline

use thiserror::Error;

/// Errors surfaced by the extraction pipeline
///
/// `extract` itself returns a plain fact list and reports provider
/// failures only through the observer, so the variants here cover the
/// operations that do propagate: storage and configuration.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Memory store error during `extract_and_store`
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
