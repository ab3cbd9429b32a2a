//! Judge-model evaluation of one model's full set of responses.

use crate::{
    chat::ChatMessage,
    config::{ModelSpec, PromptSet},
    error::LLMError,
    registry::ProviderRegistry,
};

/// Responses of one model keyed by prompt id, in prompt order.
pub type Responses = Vec<(String, String)>;

pub struct Evaluator {
    judge: ModelSpec,
    instructions: String,
}

impl Evaluator {
    pub fn new(judge: ModelSpec, instructions: impl Into<String>) -> Self {
        Self {
            judge,
            instructions: instructions.into(),
        }
    }

    /// Instruction as system message, then per response the prompt (when
    /// known) and the response as user messages.
    pub fn build_messages(&self, responses: &[(String, String)], prompts: &PromptSet) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(1 + responses.len() * 2);
        messages.push(ChatMessage::system().content(&self.instructions).build());
        for (id, response) in responses {
            match prompts.get(id) {
                Some(prompt) => messages.push(
                    ChatMessage::user()
                        .content(format!("Prompt {id}:\n{prompt}"))
                        .build(),
                ),
                None => log::warn!("No prompt text for id {id}, sending the response alone"),
            }
            messages.push(
                ChatMessage::user()
                    .content(format!("Response to prompt {id}:\n{response}"))
                    .build(),
            );
        }
        messages
    }

    /// Asks the judge to evaluate `model_name`'s responses.
    pub async fn evaluate(
        &self,
        registry: &ProviderRegistry,
        model_name: &str,
        responses: &[(String, String)],
        prompts: &PromptSet,
    ) -> Result<String, LLMError> {
        log::info!("Evaluating {model_name} responses...");
        let messages = self.build_messages(responses, prompts);
        registry.complete(&self.judge, &messages).await
    }
}
