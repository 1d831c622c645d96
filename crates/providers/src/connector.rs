//! Config-driven connector: turns a user-supplied API key into a provider.
//!
//! The provider name and optional base URL come from configuration; the
//! key arrives at runtime (config, environment, or typed in the REPL).

use crate::openai_compat::OpenAiCompatProvider;
use recall_config::AppConfig;
use recall_core::error::ProviderError;
use recall_core::provider::{Provider, ProviderConnector};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Builds OpenAI-compatible providers for one configured backend.
#[derive(Debug, Clone)]
pub struct ConfigConnector {
    provider_name: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl ConfigConnector {
    pub fn new(provider_name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            provider_name: provider_name.into(),
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Apply an HTTP timeout to every provider this connector builds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a connector from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let base_url = config
            .api_url()
            .map(String::from)
            .unwrap_or_else(|| default_base_url(&config.provider));

        let connector = Self::new(&config.provider, base_url);
        match config.request_timeout_secs {
            Some(secs) => connector.with_timeout(Duration::from_secs(secs)),
            None => connector,
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ProviderConnector for ConfigConnector {
    fn connect(&self, api_key: &str) -> Result<Arc<dyn Provider>, ProviderError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ProviderError::MissingCredential(self.provider_name.clone()));
        }

        debug!(provider = %self.provider_name, base_url = %self.base_url, "Connecting provider");

        let provider =
            OpenAiCompatProvider::new(&self.provider_name, &self.base_url, api_key, self.timeout)?;
        Ok(Arc::new(provider))
    }
}

/// Get the default base URL for well-known providers.
pub fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "groq" => "https://api.groq.com/openai/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "deepseek" => "https://api.deepseek.com/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "fireworks" => "https://api.fireworks.ai/inference/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_config::ProviderConfig;

    #[test]
    fn default_base_urls() {
        assert!(default_base_url("groq").contains("api.groq.com"));
        assert!(default_base_url("openai").contains("api.openai.com"));
        assert!(default_base_url("ollama").contains("localhost:11434"));
    }

    #[test]
    fn build_from_default_config() {
        let connector = ConfigConnector::from_config(&AppConfig::default());
        assert_eq!(connector.provider_name(), "groq");
        assert!(connector.base_url().contains("api.groq.com"));
        assert!(connector.timeout.is_none());
    }

    #[test]
    fn config_url_and_timeout_override_defaults() {
        let mut config = AppConfig {
            provider: "ollama".into(),
            request_timeout_secs: Some(15),
            ..AppConfig::default()
        };
        config.providers.insert(
            "ollama".into(),
            ProviderConfig {
                api_key: None,
                api_url: Some("http://gpu-box:11434/v1".into()),
            },
        );
        let connector = ConfigConnector::from_config(&config);
        assert_eq!(connector.base_url(), "http://gpu-box:11434/v1");
        assert_eq!(connector.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn empty_key_is_a_missing_credential() {
        let connector = ConfigConnector::new("groq", default_base_url("groq"));
        let err = connector.connect("   ").err().unwrap();
        assert!(matches!(err, ProviderError::MissingCredential(name) if name == "groq"));
    }

    #[test]
    fn non_empty_key_connects() {
        let connector = ConfigConnector::new("groq", default_base_url("groq"));
        let provider = connector.connect("gsk-test").unwrap();
        assert_eq!(provider.name(), "groq");
    }
}
