use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse},
    error::LLMError,
};

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug)]
struct TextResponse(String);

impl std::fmt::Display for TextResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ChatResponse for TextResponse {
    fn text(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Replies with canned texts in order and records every request.
/// Once the script runs out every call fails.
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            model: model.to_string(),
            messages: messages.to_vec(),
        });
        let reply = self.replies.lock().expect("replies lock").pop_front();
        reply
            .map(|text| Box::new(TextResponse(text)) as Box<dyn ChatResponse>)
            .ok_or_else(|| LLMError::ProviderError(format!("{model} is unreachable")))
    }
}
