//! Provider-neutral LLM request/response types and the provider trait
//!
//! A diagram generation is a single-turn exchange: one system instruction and
//! one user instruction in, one block of text out. The types keep a message
//! list anyway so adapters map roles the same way for every provider.
//!
//! ### Role mapping
//! - **OpenAI**: `system`, `user`, `assistant` are sent as-is; the system
//!   prompt becomes the first message.
//! - **Anthropic**: only `user` and `assistant` appear in `messages`; the
//!   system prompt is hoisted to the top-level `system` field.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Universal LLM request structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LLMRequest {
    pub messages: Vec<Message>,
    pub system_prompt: Option<String>,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl LLMRequest {
    /// A one-shot request: system instruction plus a single user message
    pub fn single_turn(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            messages: vec![Message::user(user_message.into())],
            system_prompt: Some(system_prompt.into()),
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Universal message structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: String) -> Self {
        Self {
            role: MessageRole::User,
            content,
        }
    }

    pub fn system(content: String) -> Self {
        Self {
            role: MessageRole::System,
            content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Role string for the OpenAI chat completions API
    pub fn as_openai_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    /// Role string for the Anthropic messages API
    /// System messages are hoisted to the `system` parameter, never sent inline.
    pub fn as_anthropic_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Universal LLM response
#[derive(Debug, Clone, PartialEq)]
pub struct LLMResponse {
    pub content: Option<String>,
    pub usage: Option<Usage>,
    pub finish_reason: FinishReason,
}

impl LLMResponse {
    /// Response text, or an empty string when the provider returned none
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error(String),
}

/// Universal LLM provider trait
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name (e.g., "openai", "anthropic")
    fn name(&self) -> &str;

    /// Generate completion
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    /// Get supported models
    fn supported_models(&self) -> Vec<String>;

    /// Validate request for this provider
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

impl LLMError {
    /// Classify a non-success HTTP response
    pub fn from_http_status(status: u16, body: &str, formatted: String) -> Self {
        let lowered = body.to_lowercase();
        if status == 429 || lowered.contains("insufficient_quota") || lowered.contains("rate limit")
        {
            return LLMError::RateLimit;
        }
        match status {
            401 | 403 => LLMError::Authentication(formatted),
            400 | 404 | 422 => LLMError::InvalidRequest(formatted),
            _ => LLMError::Provider(formatted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_turn_request_shape() {
        let request = LLMRequest::single_turn("gpt-4o", "be terse", "draw it")
            .with_temperature(0.5)
            .with_max_tokens(100);
        assert_eq!(request.messages, vec![Message::user("draw it".to_string())]);
        assert_eq!(request.system_prompt.as_deref(), Some("be terse"));
        assert_eq!(request.temperature, Some(0.5));
        assert_eq!(request.max_tokens, Some(100));
    }

    #[test]
    fn http_status_classification() {
        assert_eq!(
            LLMError::from_http_status(429, "", String::new()),
            LLMError::RateLimit
        );
        assert_eq!(
            LLMError::from_http_status(400, "{\"error\":\"insufficient_quota\"}", String::new()),
            LLMError::RateLimit
        );
        assert!(matches!(
            LLMError::from_http_status(401, "bad key", "bad key".into()),
            LLMError::Authentication(_)
        ));
        assert!(matches!(
            LLMError::from_http_status(500, "boom", "boom".into()),
            LLMError::Provider(_)
        ));
    }

    #[test]
    fn missing_content_reads_as_empty() {
        let response = LLMResponse {
            content: None,
            usage: None,
            finish_reason: FinishReason::Stop,
        };
        assert_eq!(response.text(), "");
    }
}
