//! Configuration for the extraction pipeline

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the extraction model
pub const MODEL_ENV: &str = "KEEPSAKE_GEMINI_MODEL";

/// Package-specific environment variable for the Gemini credential
pub const API_KEY_ENV: &str = "KEEPSAKE_GEMINI_API_KEY";

/// Shared Google credential, consulted after the package-specific variable
pub const SHARED_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Model used when neither the config nor the environment names one
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

fn default_temperature() -> f32 {
    0.3
}

/// Configuration for [`MemoryExtractor`](crate::MemoryExtractor)
///
/// Model and credential resolution happens per extraction call:
/// an explicit config value wins, then the environment, then the default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Explicit model identifier; beats `KEEPSAKE_GEMINI_MODEL` and the default
    #[serde(default)]
    pub model: Option<String>,

    /// Explicit credential; beats `KEEPSAKE_GEMINI_API_KEY` and `GOOGLE_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sampling temperature; the 0.3 default biases toward conservative,
    /// repeatable extraction
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: None,
            api_key: None,
            temperature: default_temperature(),
        }
    }
}

impl ExtractorConfig {
    /// Resolve the model identifier for one call
    ///
    /// Precedence: explicit config value, then `KEEPSAKE_GEMINI_MODEL`,
    /// then [`DEFAULT_MODEL`]. Empty values are treated as unset.
    pub fn resolve_model(&self) -> String {
        non_empty(self.model.clone())
            .or_else(|| non_empty(std::env::var(MODEL_ENV).ok()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Resolve the credential for one call, if any source provides one
    ///
    /// Precedence: explicit config value, then `KEEPSAKE_GEMINI_API_KEY`,
    /// then `GOOGLE_API_KEY`. Empty values are treated as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        non_empty(self.api_key.clone())
            .or_else(|| non_empty(std::env::var(API_KEY_ENV).ok()))
            .or_else(|| non_empty(std::env::var(SHARED_API_KEY_ENV).ok()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(ExtractorError::Config(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Serializes environment-dependent tests across the crate; process
/// environment is global state.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn clear_extraction_env() {
    std::env::remove_var(MODEL_ENV);
    std::env::remove_var(API_KEY_ENV);
    std::env::remove_var(SHARED_API_KEY_ENV);
}
