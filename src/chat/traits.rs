use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;
use super::usage::Usage;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
    fn usage(&self) -> Option<Usage> {
        None
    }
}

/// Trait for backends that serve chat-style completions for named models.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    /// Sends `messages` to `model` and returns the raw backend reply.
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Box<dyn ChatResponse>, LLMError>;

    /// Sends `messages` to `model` and returns the reply text, trimmed.
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String, LLMError> {
        let response = self.chat(model, messages).await?;
        if let Some(usage) = response.usage() {
            log::debug!(
                "{model} usage: prompt={} completion={} total={}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }
        response
            .text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| LLMError::ResponseFormatError {
                message: format!("no text in response from {model}"),
                raw_response: response.to_string(),
            })
    }
}
