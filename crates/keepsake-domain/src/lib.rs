//! Keepsake Domain Layer
//!
//! Core types shared by every other Keepsake crate: the conversation window
//! that extraction consumes, the memory facts it produces, and the trait
//! boundary behind which long-term storage lives.
//!
//! ## Key Concepts
//!
//! - **Message**: one turn of conversation, immutable once captured
//! - **MemoryFact**: a normalized, categorized, third-person statement about
//!   the user worth persisting
//! - **MemoryCategory**: the five-way classification every fact carries
//! - **MemoryStore**: the async boundary to the persistence layer
//!
//! ## Architecture
//!
//! This crate carries no HTTP, database, or runtime dependencies. Provider
//! and storage implementations live in `keepsake-llm` and `keepsake-store`;
//! the extraction pipeline lives in `keepsake-extractor`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod memory;
pub mod message;
pub mod traits;

// Re-exports for convenience
pub use category::MemoryCategory;
pub use memory::{MemoryFact, MemoryId};
pub use message::{Message, Role};
pub use traits::{MemoryStats, MemoryStore};
