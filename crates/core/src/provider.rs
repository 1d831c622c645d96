//! Provider trait: the abstraction over hosted LLM backends.
//!
//! A Provider knows how to send a list of entries to an LLM and get a
//! completion back. A `ProviderConnector` turns a user-supplied credential
//! into a ready Provider.

use crate::error::ProviderError;
use crate::message::ConversationEntry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "llama-3.1-8b-instant")
    pub model: String,

    /// The messages to send
    pub messages: Vec<ConversationEntry>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

impl ProviderRequest {
    /// A request carrying a single user prompt.
    pub fn prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ConversationEntry::user(prompt)],
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated text
    pub content: String,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The session calls `complete()` without knowing which backend is behind it.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "groq", "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(&self, request: ProviderRequest) -> std::result::Result<ProviderResponse, ProviderError>;

    /// Health check: can we reach the provider with this credential?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

/// Builds a Provider from an API key.
///
/// Fails with `ProviderError::MissingCredential` when the key is unusable.
pub trait ProviderConnector: Send + Sync {
    fn connect(&self, api_key: &str) -> std::result::Result<Arc<dyn Provider>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;

    #[test]
    fn prompt_request_defaults() {
        let req = ProviderRequest::prompt("llama-3.1-8b-instant", "Hello");
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!(req.max_tokens.is_none());
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.messages[0].content, "Hello");
    }

    #[test]
    fn request_omits_unset_max_tokens() {
        let req = ProviderRequest::prompt("m", "p");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("max_tokens"));
    }
}
