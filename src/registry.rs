use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    backends::{LLMBackend, Ollama, OpenAI},
    chat::{ChatMessage, ChatProvider},
    config::{BackendsConfig, ModelSpec},
    error::LLMError,
};

/// Routes each model to the backend client serving it.
#[derive(Clone)]
pub struct ProviderRegistry {
    default_backend: LLMBackend,
    providers: HashMap<LLMBackend, Arc<dyn ChatProvider>>,
}

impl ProviderRegistry {
    pub fn new(default_backend: LLMBackend) -> Self {
        Self {
            default_backend,
            providers: HashMap::new(),
        }
    }

    pub fn with_provider(mut self, backend: LLMBackend, provider: Arc<dyn ChatProvider>) -> Self {
        self.providers.insert(backend, provider);
        self
    }

    /// Builds the Ollama client, and the OpenAI client when an API key is available.
    pub fn from_config(config: &BackendsConfig) -> Result<Self, LLMError> {
        let ollama = Ollama::new(
            config.ollama.base_url.clone(),
            config.ollama.api_key.clone(),
            config.ollama.timeout_seconds,
        )?;
        let mut registry =
            Self::new(config.default).with_provider(LLMBackend::Ollama, Arc::new(ollama));

        match config.openai.resolve_api_key() {
            Some(key) => {
                let openai = OpenAI::new(
                    key,
                    config.openai.base_url.clone(),
                    config.openai.timeout_seconds,
                )?;
                registry = registry.with_provider(LLMBackend::OpenAI, Arc::new(openai));
            }
            None => log::debug!("No OpenAI API key configured, openai backend disabled"),
        }
        Ok(registry)
    }

    pub fn provider(&self, backend: LLMBackend) -> Result<&dyn ChatProvider, LLMError> {
        self.providers
            .get(&backend)
            .map(|p| p.as_ref())
            .ok_or_else(|| {
                LLMError::InvalidRequest(format!(
                    "backend {backend} is not configured (missing API key?)"
                ))
            })
    }

    /// Sends `messages` to the model and returns the trimmed reply text.
    pub async fn complete(
        &self,
        model: &ModelSpec,
        messages: &[ChatMessage],
    ) -> Result<String, LLMError> {
        let backend = model.backend_or(self.default_backend);
        log::debug!(
            "Sending {} messages to {} via {backend}",
            messages.len(),
            model.name
        );
        self.provider(backend)?.complete(&model.name, messages).await
    }
}
