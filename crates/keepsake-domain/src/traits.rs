//! Trait definitions for external interactions
//!
//! These traits define the boundary between the extraction pipeline and
//! infrastructure. Implementations live in other crates
//! (`keepsake-store` for persistence).

use crate::category::MemoryCategory;
use crate::memory::MemoryFact;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate counts reported by a memory store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    /// Total number of facts ever stored
    pub total_memories: usize,

    /// Fact count per category
    pub by_category: BTreeMap<MemoryCategory, usize>,
}

/// Trait for persisting extracted memories
///
/// Implemented by the infrastructure layer (`keepsake-store`). The pipeline
/// only ever calls these three methods; indexing, deduplication, and
/// retrieval are the implementation's own business.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Error type for store operations
    type Error: std::fmt::Display;

    /// Persist a batch of facts produced by one extraction call
    ///
    /// `session_id` and `turn_number` tag the batch with where in the
    /// conversation it came from; both are optional.
    async fn store_batch(
        &self,
        facts: &[MemoryFact],
        session_id: Option<&str>,
        turn_number: Option<u32>,
    ) -> Result<(), Self::Error>;

    /// Report aggregate counts, including at least the total fact count
    async fn get_stats(&self) -> Result<MemoryStats, Self::Error>;

    /// Flush any pending state before shutdown
    async fn cleanup(&self) -> Result<(), Self::Error>;
}
