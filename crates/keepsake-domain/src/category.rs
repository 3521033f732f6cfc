//! Category module - the five-way classification every memory carries

use serde::{Deserialize, Serialize};

/// Category of an extracted memory
///
/// Every fact the extractor produces is filed under exactly one of these:
/// - Identity: location, job, family members, age, background
/// - Preference: likes, dislikes, communication style, explicit requests
/// - Context: current projects, problems, life events in progress
/// - Relationship: shared moments, emotional references, inside jokes
/// - Surprise: unusual or unexpected facts that stand out
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCategory {
    /// Core facts about who the user is (not their name)
    Identity,

    /// Likes, dislikes, and explicit requests
    Preference,

    /// Ongoing projects, problems, and life events
    Context,

    /// Emotional moments and shared references
    Relationship,

    /// Unusual facts that stand out
    Surprise,
}

impl MemoryCategory {
    /// Get the category name as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryCategory::Identity => "identity",
            MemoryCategory::Preference => "preference",
            MemoryCategory::Context => "context",
            MemoryCategory::Relationship => "relationship",
            MemoryCategory::Surprise => "surprise",
        }
    }

    /// Parse a category from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use keepsake_domain::MemoryCategory;
    ///
    /// assert_eq!(MemoryCategory::parse("identity"), Some(MemoryCategory::Identity));
    /// assert_eq!(MemoryCategory::parse("weather"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "identity" => Some(MemoryCategory::Identity),
            "preference" => Some(MemoryCategory::Preference),
            "context" => Some(MemoryCategory::Context),
            "relationship" => Some(MemoryCategory::Relationship),
            "surprise" => Some(MemoryCategory::Surprise),
            _ => None,
        }
    }

    /// All categories in declaration order
    pub fn all() -> [MemoryCategory; 5] {
        [
            MemoryCategory::Identity,
            MemoryCategory::Preference,
            MemoryCategory::Context,
            MemoryCategory::Relationship,
            MemoryCategory::Surprise,
        ]
    }
}

impl Default for MemoryCategory {
    /// `Context` is the fallback applied when a provider omits the category
    fn default() -> Self {
        MemoryCategory::Context
    }
}

impl std::fmt::Display for MemoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemoryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}
