//! Shared test helpers for session tests.

use recall_core::error::ProviderError;
use recall_core::provider::{Provider, ProviderConnector, ProviderRequest, ProviderResponse, Usage};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A mock provider that returns a sequence of scripted results and records
/// every request it receives.
///
/// Panics if more calls are made than results provided.
pub struct ScriptedProvider {
    results: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(results: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that answers with each text in turn.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The prompt text of every call so far.
    pub fn prompts(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.messages[0].content.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let call = self.call_count();
        self.requests.lock().unwrap().push(request);
        let next = self.results.lock().unwrap().pop_front();
        let Some(result) = next else {
            panic!("ScriptedProvider: no more responses (call #{call})");
        };
        result.map(|content| ProviderResponse {
            content,
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: "mock-model".into(),
        })
    }
}

/// Hands out the same scripted provider for any non-blank key.
pub struct ScriptedConnector {
    provider: Arc<ScriptedProvider>,
}

impl ScriptedConnector {
    pub fn new(provider: Arc<ScriptedProvider>) -> Self {
        Self { provider }
    }
}

impl ProviderConnector for ScriptedConnector {
    fn connect(&self, api_key: &str) -> Result<Arc<dyn Provider>, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential("scripted_mock".into()));
        }
        Ok(self.provider.clone())
    }
}
