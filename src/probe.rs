//! Checks whether models honour a system prompt by asking the same question
//! with and without one.

use crate::{
    chat::ChatMessage,
    config::{ModelSpec, ProbeConfig},
    error::LLMError,
    registry::ProviderRegistry,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub model: String,
    pub without_system: String,
    pub with_system: String,
}

pub struct SystemPromptProbe {
    system_prompt: String,
    user_query: String,
}

impl SystemPromptProbe {
    pub fn new(system_prompt: impl Into<String>, user_query: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_query: user_query.into(),
        }
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(&config.system_prompt, &config.user_query)
    }

    pub async fn probe(
        &self,
        registry: &ProviderRegistry,
        model: &ModelSpec,
    ) -> Result<ProbeOutcome, LLMError> {
        let query = ChatMessage::user().content(&self.user_query).build();

        log::info!("Testing {} without system prompt", model.name);
        let without_system = registry.complete(model, &[query.clone()]).await?;

        log::info!("Testing {} with system prompt", model.name);
        let system = ChatMessage::system().content(&self.system_prompt).build();
        let with_system = registry.complete(model, &[system, query]).await?;

        Ok(ProbeOutcome {
            model: model.name.clone(),
            without_system,
            with_system,
        })
    }

}
