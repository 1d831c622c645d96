//! OpenAI-compatible provider implementation.
//!
//! Works with: Groq, OpenAI, OpenRouter, Ollama, vLLM, Together AI,
//! Fireworks AI, and any OpenAI-compatible endpoint.
//!
//! Only non-streaming chat completions are used: one prompt in, the first
//! choice's content out.

use async_trait::async_trait;
use recall_core::error::ProviderError;
use recall_core::message::ConversationEntry;
use recall_core::provider::{ProviderRequest, ProviderResponse, Usage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// An OpenAI-compatible LLM provider.
///
/// This handles the vast majority of hosted LLM APIs since most expose
/// an OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Base URL requests are sent to (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Convert our entries to OpenAI API format.
    fn to_api_messages(messages: &[ConversationEntry]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: m.role.as_str().into(),
                content: Some(m.content.clone()),
            })
            .collect()
    }

    /// Map a non-200 status to a provider error.
    async fn status_error(&self, response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        match status {
            429 => ProviderError::RateLimited,
            401 | 403 => ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ),
            _ => {
                let error_body = response.text().await.unwrap_or_default();
                warn!(provider = %self.name, status, body = %error_body, "Provider returned error");
                ProviderError::ApiError {
                    status_code: status,
                    message: error_body,
                }
            }
        }
    }
}

#[async_trait]
impl recall_core::Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(&request.messages),
            "temperature": request.temperature,
            "stream": false,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        debug!(provider = %self.name, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if response.status().as_u16() != 200 {
            return Err(self.status_error(response).await);
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        Self::into_provider_response(api_response)
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        match response.status().as_u16() {
            401 | 403 => Err(ProviderError::AuthenticationFailed("Invalid API key".into())),
            _ => Ok(response.status().is_success()),
        }
    }
}

impl OpenAiCompatProvider {
    fn into_provider_response(api_response: ApiResponse) -> Result<ProviderResponse, ProviderError> {
        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 200,
                message: "No choices in response".into(),
            })?;

        let usage = api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ProviderResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
            model: api_response.model,
        })
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::Provider;

    #[test]
    fn trailing_slash_is_trimmed() {
        let provider =
            OpenAiCompatProvider::new("custom", "http://localhost:8000/v1/", "k", None).unwrap();
        assert_eq!(provider.base_url(), "http://localhost:8000/v1");
    }

    #[test]
    fn message_conversion() {
        let messages = vec![
            ConversationEntry::user("Hello"),
            ConversationEntry::assistant("Hi!"),
        ];
        let api_messages = OpenAiCompatProvider::to_api_messages(&messages);
        assert_eq!(api_messages.len(), 2);
        assert_eq!(api_messages[0].role, "user");
        assert_eq!(api_messages[1].role, "assistant");
        assert_eq!(api_messages[1].content.as_deref(), Some("Hi!"));
    }

    #[test]
    fn parse_completion_response() {
        let data = r#"{
            "id": "chatcmpl-1",
            "model": "llama-3.1-8b-instant",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Paris."}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 2, "total_tokens": 14}
        }"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        let response = OpenAiCompatProvider::into_provider_response(parsed).unwrap();
        assert_eq!(response.content, "Paris.");
        assert_eq!(response.model, "llama-3.1-8b-instant");
        assert_eq!(response.usage.unwrap().total_tokens, 14);
    }

    #[test]
    fn empty_choices_is_an_error() {
        let data = r#"{"model": "m", "choices": [], "usage": null}"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        let err = OpenAiCompatProvider::into_provider_response(parsed).unwrap_err();
        assert!(err.to_string().contains("No choices"));
    }

    #[test]
    fn null_content_becomes_empty_text() {
        let data = r#"{"model": "m", "choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let parsed: ApiResponse = serde_json::from_str(data).unwrap();
        let response = OpenAiCompatProvider::into_provider_response(parsed).unwrap();
        assert_eq!(response.content, "");
    }

    /// Serve one canned HTTP response on a local port and return its base URL
    /// plus a handle yielding the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });
        (format!("http://{addr}/v1"), handle)
    }

    #[tokio::test]
    async fn complete_posts_bearer_prompt() {
        let (base_url, request) = serve_once(
            "200 OK",
            r#"{"model":"llama-3.1-8b-instant","choices":[{"message":{"role":"assistant","content":"Hi there"}}]}"#,
        )
        .await;
        let provider = OpenAiCompatProvider::new("groq", base_url, "gsk-local", None).unwrap();

        let response = provider
            .complete(ProviderRequest::prompt("llama-3.1-8b-instant", "Hello"))
            .await
            .unwrap();
        assert_eq!(response.content, "Hi there");

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions"));
        assert!(raw.to_lowercase().contains("authorization: bearer gsk-local"));
        assert!(raw.contains(r#""content":"Hello""#));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let (base_url, _request) = serve_once("401 Unauthorized", r#"{"error":"bad key"}"#).await;
        let provider = OpenAiCompatProvider::new("groq", base_url, "gsk-wrong", None).unwrap();

        let err = provider
            .complete(ProviderRequest::prompt("m", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let (base_url, _request) = serve_once("503 Service Unavailable", r#"{"error":"overloaded"}"#).await;
        let provider = OpenAiCompatProvider::new("groq", base_url, "gsk", None).unwrap();

        match provider.complete(ProviderRequest::prompt("m", "Hello")).await {
            Err(ProviderError::ApiError { status_code, message }) => {
                assert_eq!(status_code, 503);
                assert!(message.contains("overloaded"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }
}
