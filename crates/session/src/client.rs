//! Generation client: one prompt string in, one completion string out.

use recall_config::AppConfig;
use recall_core::error::ProviderError;
use recall_core::provider::{Provider, ProviderRequest};
use std::sync::Arc;
use tracing::debug;

/// Model settings applied to every generation call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".into(),
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

impl From<&AppConfig> for GenerationSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: Some(config.max_tokens).filter(|&n| n > 0),
        }
    }
}

/// A provider bound to a credential and model settings.
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn Provider>,
    settings: GenerationSettings,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn Provider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Send `prompt` as a single user message and return the completion text.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut request = ProviderRequest::prompt(&self.settings.model, prompt);
        request.temperature = self.settings.temperature;
        request.max_tokens = self.settings.max_tokens;

        debug!(
            provider = %self.provider.name(),
            model = %self.settings.model,
            prompt_chars = prompt.len(),
            "Generating"
        );

        let response = self.provider.complete(request).await?;
        Ok(response.content)
    }

    pub async fn health_check(&self) -> Result<bool, ProviderError> {
        self.provider.health_check().await
    }
}
