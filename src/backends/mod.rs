pub mod ollama;
pub mod openai;

use serde::{Deserialize, Serialize};

use crate::error::LLMError;

pub use ollama::Ollama;
pub use openai::OpenAI;

/// Supported inference backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMBackend {
    /// Locally hosted model runner.
    #[default]
    Ollama,
    /// Remote hosted API.
    OpenAI,
}

impl LLMBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            LLMBackend::Ollama => "ollama",
            LLMBackend::OpenAI => "openai",
        }
    }
}

impl std::fmt::Display for LLMBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LLMBackend {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(LLMBackend::Ollama),
            "openai" => Ok(LLMBackend::OpenAI),
            _ => Err(LLMError::InvalidRequest(format!(
                "Unknown LLM backend: {s}"
            ))),
        }
    }
}
