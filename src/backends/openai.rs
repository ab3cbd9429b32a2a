//! OpenAI chat-completions client for hosted models.

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

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/";

/// Configuration for the OpenAI client.
#[derive(Debug)]
pub struct OpenAIConfig {
    /// API key for authentication with OpenAI.
    pub api_key: SecretString,
    /// Base URL, ending with a slash.
    pub base_url: String,
    /// Request timeout in seconds. `None` waits forever.
    pub timeout_seconds: Option<u64>,
}

/// Client for OpenAI's API and servers compatible with it.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAI {
    pub config: Arc<OpenAIConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct OpenAIChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatMsg {
    content: Option<String>,
}

impl std::fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "{self:?}"),
        }
    }
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage
    }
}

impl OpenAI {
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        Ok(Self::with_client(
            builder.build()?,
            api_key,
            base_url,
            timeout_seconds,
        ))
    }

    /// Creates a new OpenAI client with a custom HTTP client.
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            config: Arc::new(OpenAIConfig {
                api_key: SecretString::new(api_key.into()),
                base_url,
                timeout_seconds,
            }),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        if self.config.api_key.expose_secret().is_empty() {
            return Err(LLMError::AuthError("Missing OpenAI API key".to_string()));
        }

        let body = OpenAIChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| OpenAIChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("OpenAI request payload: {}", json);
            }
        }

        let url = format!("{}chat/completions", self.config.base_url);
        let resp = self
            .client
            .post(url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        log::debug!("OpenAI HTTP status: {}", status);

        let raw = resp.text().await?;
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LLMError::AuthError(raw));
        }
        if !status.is_success() {
            return Err(LLMError::ProviderError(format!(
                "OpenAI returned HTTP {} for model {model}: {raw}",
                status.as_u16()
            )));
        }

        let json_resp: OpenAIChatResponse =
            serde_json::from_str(&raw).map_err(|err| LLMError::ResponseFormatError {
                message: format!("failed to decode OpenAI chat response: {err}"),
                raw_response: raw.clone(),
            })?;

        Ok(Box::new(json_resp))
    }
}
