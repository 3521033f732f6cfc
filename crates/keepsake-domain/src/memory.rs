//! Memory module - the fundamental unit of Keepsake's output

use crate::category::MemoryCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a stored memory, based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for temporal queries
/// - 128-bit uniqueness
/// - No coordination required between concurrent writers
///
/// Facts have no identity while in flight; an id is minted by the store
/// when a fact is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemoryId(u128);

impl MemoryId {
    /// Generate a new UUIDv7-based MemoryId
    ///
    /// # Examples
    ///
    /// ```
    /// use keepsake_domain::MemoryId;
    ///
    /// let id = MemoryId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a MemoryId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a MemoryId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUID string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for MemoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A memorable fact about the user
///
/// The normalized output of one extraction: a third-person statement, its
/// category, and an importance score. Importance is nominally 1-5 (5 = core
/// identity, 1 = minor detail) but the pipeline only coerces it to an
/// integer; it never clamps or rejects out-of-range values.
///
/// # Examples
///
/// ```
/// use keepsake_domain::{MemoryCategory, MemoryFact};
///
/// let fact = MemoryFact::new(
///     "User's brother Mike works at Google",
///     MemoryCategory::Identity,
///     5,
/// );
/// assert_eq!(fact.category, MemoryCategory::Identity);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryFact {
    /// The fact, phrased in third person
    pub content: String,

    /// Classification of the fact
    pub category: MemoryCategory,

    /// 1-5 scale, not enforced beyond integer coercion
    pub importance: i64,
}

impl MemoryFact {
    /// Create a new memory fact
    pub fn new(content: impl Into<String>, category: MemoryCategory, importance: i64) -> Self {
        Self {
            content: content.into(),
            category,
            importance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_id_is_unique() {
        let a = MemoryId::new();
        let b = MemoryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_memory_id_string_round_trip() {
        let id = MemoryId::new();
        let parsed = MemoryId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_memory_id_timestamp_is_recent() {
        let id = MemoryId::new();
        // Sanity bound: after 2020-01-01 in milliseconds
        assert!(id.timestamp() > 1_577_836_800_000);
    }

    #[test]
    fn test_memory_ids_sort_chronologically() {
        let earlier = MemoryId::new();
        // Land in a later millisecond so the timestamp bits must differ
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = MemoryId::new();
        assert!(earlier < later);
    }

    #[test]
    fn test_fact_serializes_with_lowercase_category() {
        let fact = MemoryFact::new("User dislikes cilantro", MemoryCategory::Preference, 3);
        let json = serde_json::to_string(&fact).unwrap();
        assert!(json.contains(r#""category":"preference""#));
    }
}
