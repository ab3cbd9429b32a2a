//! Ollama client for locally hosted models.
//!
//! Talks to the `/api/chat` endpoint with streaming disabled, so every call
//! returns a single JSON document holding the whole reply.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Usage},
    error::LLMError,
};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Configuration for the Ollama client.
#[derive(Debug)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Optional bearer token, for servers sitting behind an auth proxy.
    pub api_key: Option<SecretString>,
    /// Request timeout in seconds. `None` waits forever.
    pub timeout_seconds: Option<u64>,
}

/// Client for an Ollama server.
#[derive(Debug, Clone)]
pub struct Ollama {
    pub config: Arc<OllamaConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct OllamaChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaChatMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct OllamaChatResponse {
    message: Option<OllamaChatMsg>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Deserialize, Debug)]
struct OllamaChatMsg {
    content: String,
}

impl std::fmt::Display for OllamaChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}", msg.content),
            None => write!(f, "{self:?}"),
        }
    }
}

impl ChatResponse for OllamaChatResponse {
    fn text(&self) -> Option<String> {
        self.message.as_ref().map(|m| m.content.clone())
    }

    fn usage(&self) -> Option<Usage> {
        match (self.prompt_eval_count, self.eval_count) {
            (None, None) => None,
            (prompt, completion) => Some(Usage::new(
                prompt.unwrap_or_default(),
                completion.unwrap_or_default(),
            )),
        }
    }
}

impl Ollama {
    pub fn new(
        base_url: Option<String>,
        api_key: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        Ok(Self::with_client(
            builder.build()?,
            base_url,
            api_key,
            timeout_seconds,
        ))
    }

    /// Creates a new Ollama client with a custom HTTP client.
    pub fn with_client(
        client: Client,
        base_url: Option<String>,
        api_key: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            config: Arc::new(OllamaConfig {
                base_url: base_url.unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
                api_key: api_key.map(SecretString::new),
                timeout_seconds,
            }),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatProvider for Ollama {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        let body = OllamaChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| OllamaChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Ollama request payload: {}", json);
            }
        }

        let mut request = self.client.post(self.chat_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let resp = request.send().await?;
        let status = resp.status();
        log::debug!("Ollama HTTP status: {}", status);

        let raw = resp.text().await?;
        if !status.is_success() {
            return Err(LLMError::ProviderError(format!(
                "Ollama returned HTTP {} for model {model}: {raw}",
                status.as_u16()
            )));
        }

        let json_resp: OllamaChatResponse =
            serde_json::from_str(&raw).map_err(|err| LLMError::ResponseFormatError {
                message: format!("failed to decode Ollama chat response: {err}"),
                raw_response: raw.clone(),
            })?;

        Ok(Box::new(json_resp))
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn chat_posts_model_and_roles() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::Json(json!({
                "model": "llama3:8b",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "Say hi"}
                ],
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"model":"llama3:8b","message":{"role":"assistant","content":"  hi there \n"},"done":true,"prompt_eval_count":12,"eval_count":3}"#,
            )
            .create_async()
            .await;

        let ollama = Ollama::new(Some(server.url()), None, None).unwrap();
        let messages = [
            ChatMessage::system().content("be brief").build(),
            ChatMessage::user().content("Say hi").build(),
        ];
        let text = ollama.complete("llama3:8b", &messages).await.unwrap();

        assert_eq!(text, "hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn usage_comes_from_eval_counts() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"message":{"content":"ok"},"prompt_eval_count":12,"eval_count":3}"#)
            .create_async()
            .await;

        let ollama = Ollama::new(Some(server.url()), None, None).unwrap();
        let resp = ollama
            .chat("m", &[ChatMessage::user().content("x").build()])
            .await
            .unwrap();
        assert_eq!(resp.usage(), Some(Usage::new(12, 3)));
    }

    #[tokio::test]
    async fn http_failure_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body(r#"{"error":"model 'nope' not found"}"#)
            .create_async()
            .await;

        let ollama = Ollama::new(Some(server.url()), None, None).unwrap();
        let err = ollama
            .complete("nope", &[ChatMessage::user().content("x").build()])
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::ProviderError(ref msg) if msg.contains("not found")));
    }

    #[tokio::test]
    async fn missing_message_is_format_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"done":true}"#)
            .create_async()
            .await;

        let ollama = Ollama::new(Some(server.url()), None, None).unwrap();
        let err = ollama
            .complete("m", &[ChatMessage::user().content("x").build()])
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::ResponseFormatError { .. }));
    }

    #[test]
    fn default_url_is_local() {
        let ollama = Ollama::new(None, None, None).unwrap();
        assert_eq!(ollama.base_url(), DEFAULT_OLLAMA_URL);
        assert_eq!(ollama.chat_url(), "http://localhost:11434/api/chat");
    }
}
