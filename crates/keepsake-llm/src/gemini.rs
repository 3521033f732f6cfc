//! Gemini REST API integration
//!
//! Wire types and provider for the `models/{model}:generateContent`
//! endpoint. The credential travels as a `key` query parameter; the request
//! body carries the conversation, a system instruction, tool declarations,
//! and generation config.
//!
//! One call issues exactly one request. There is no retry: a transport or
//! status failure surfaces immediately so the caller can classify the
//! attempt.

use crate::{GenerateContent, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Gemini REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One message part: free text or a structured function call
///
/// The same shape appears in both requests (text only) and responses
/// (text and/or function calls).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Free-text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Structured invocation of a declared function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl Part {
    /// Build a text-only part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_call: None,
        }
    }
}

/// A structured function invocation returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the declared function
    pub name: String,

    /// Arguments as free-form JSON
    #[serde(default)]
    pub args: serde_json::Value,
}

/// A role-tagged group of parts in the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"
    pub role: String,

    /// Message parts
    pub parts: Vec<Part>,
}

impl Content {
    /// Build a single-part user content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part::text(text)],
        }
    }
}

/// System instruction block (untagged parts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInstruction {
    /// Instruction parts
    pub parts: Vec<Part>,
}

impl SystemInstruction {
    /// Build a single-part instruction
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
        }
    }
}

/// Declaration of a callable function
///
/// `parameters` is a JSON Schema object in the API's declaration format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Function name the model uses to invoke it
    pub name: String,

    /// Guidance on when (not) to call
    pub description: String,

    /// JSON Schema for the arguments
    pub parameters: serde_json::Value,
}

/// A group of function declarations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Declared functions
    pub function_declarations: Vec<FunctionDeclaration>,
}

/// Generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
}

/// Request body for `generateContent`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents
    pub contents: Vec<Content>,

    /// System instruction block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,

    /// Tool declarations passed with every request
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,

    /// Generation parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Content of one response candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateContent {
    /// Response parts; may mix text and function calls
    #[serde(default)]
    pub parts: Vec<Part>,

    /// Role tag, if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One response candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content; absent on some finish reasons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<CandidateContent>,

    /// Why generation stopped, e.g. "STOP"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Response body from `generateContent`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate completions; commonly zero or one
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Gemini REST provider
///
/// Owns its HTTP client; the client's connection reuse is scoped to this
/// value's lifetime and nothing else is retained across calls.
pub struct GeminiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a provider against the default endpoint
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider against a custom endpoint (testing, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Issue one `generateContent` request
    ///
    /// # Errors
    ///
    /// - `Communication` if the request could not complete (DNS, connect,
    ///   timeout)
    /// - `HttpStatus` on a non-success status, body captured verbatim
    /// - `InvalidResponse` if the body does not decode
    pub async fn generate(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerateContent for GeminiProvider {
    async fn generate(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        GeminiProvider::generate(self, model, api_key, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            system_instruction: Some(SystemInstruction::text("instructions")),
            tools: vec![Tool {
                function_declarations: vec![FunctionDeclaration {
                    name: "store_memories".to_string(),
                    description: "d".to_string(),
                    parameters: json!({"type": "object"}),
                }],
            }],
            generation_config: Some(GenerationConfig { temperature: 0.3 }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "instructions");
        assert_eq!(
            value["tools"][0]["functionDeclarations"][0]["name"],
            "store_memories"
        );
        assert!((value["generationConfig"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_request_omits_absent_sections() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_none());
        assert!(value.get("tools").is_none());
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_decodes_function_call() {
        let body = json!({
            "candidates": [{
                "finishReason": "STOP",
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Noted."},
                        {"functionCall": {
                            "name": "store_memories",
                            "args": {"memories": [
                                {"content": "User lives in Austin",
                                 "category": "identity",
                                 "importance": 5}
                            ]}
                        }}
                    ]
                }
            }]
        });

        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.candidates.len(), 1);

        let candidate = &response.candidates[0];
        assert_eq!(candidate.finish_reason.as_deref(), Some("STOP"));

        let parts = &candidate.content.as_ref().unwrap().parts;
        assert_eq!(parts[0].text.as_deref(), Some("Noted."));

        let call = parts[1].function_call.as_ref().unwrap();
        assert_eq!(call.name, "store_memories");
        assert_eq!(call.args["memories"][0]["importance"], 5);
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.candidates.is_empty());

        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{}]})).unwrap();
        assert!(response.candidates[0].content.is_none());
        assert!(response.candidates[0].finish_reason.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        // Discard port: connection is refused without a network round trip
        let provider = GeminiProvider::with_base_url("http://127.0.0.1:9");

        let result = provider
            .generate("model", "key", &GenerateContentRequest::default())
            .await;

        match result {
            Err(LlmError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }
}
