// ABOUTME: Provider-neutral generation client contract
// ABOUTME: Request/response types and the error taxonomy surfaced to callers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Blocked by safety settings: {0}")]
    SafetyBlocked(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl AIServiceError {
    /// Whether the failure happened before a provider answer was received
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_) | Self::Timeout(_) | Self::ConnectionFailed(_)
        )
    }
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug)]
pub struct AIResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// One generation call: the composed prompt and an optional response schema
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// A generative text service.
///
/// Implementations perform exactly one network round-trip per call and never
/// retry; retries are a user decision.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> AIServiceResult<AIResponse<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_total() {
        let usage = Usage {
            input_tokens: 120,
            output_tokens: 30,
        };
        assert_eq!(usage.total_tokens(), 150);

        let huge = Usage {
            input_tokens: u32::MAX,
            output_tokens: 10,
        };
        assert_eq!(huge.total_tokens(), u32::MAX);
    }

    #[test]
    fn test_transport_classification() {
        assert!(AIServiceError::Timeout(120).is_transport());
        assert!(AIServiceError::ConnectionFailed("refused".into()).is_transport());
        assert!(!AIServiceError::SafetyBlocked("SAFETY".into()).is_transport());
        assert!(!AIServiceError::ApiError {
            status: 500,
            message: "boom".into()
        }
        .is_transport());
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("hello")
            .with_response_schema(serde_json::json!({"type": "OBJECT"}));
        assert_eq!(request.prompt, "hello");
        assert_eq!(request.response_schema.unwrap()["type"], "OBJECT");
    }
}
