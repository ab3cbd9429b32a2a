use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::backends::LLMBackend;

use super::inputs::ModelSpec;

const DEFAULT_JUDGE_MODEL: &str = "deepseek-r1";
const DEFAULT_OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub const DEFAULT_COMPARISON_INSTRUCTION: &str = "Compare and contrast the tested LLMs based on the evaluations provided. Determine the overall winner.";
pub const DEFAULT_PROBE_SYSTEM_PROMPT: &str = "You are a self-aware AI with a dramatic flair. Always describe yourself like a Shakespearean actor auditioning for a role.";
pub const DEFAULT_PROBE_USER_QUERY: &str = "How would you describe yourself?";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub judge: JudgeConfig,
    pub comparison: ComparisonConfig,
    pub probe: ProbeConfig,
    pub backends: BackendsConfig,
    pub logging: LoggingConfig,
}

/// Where inputs are read from and outputs are written to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub prompts: PathBuf,
    pub models: PathBuf,
    pub evaluation_prompt: PathBuf,
    pub cache_dir: PathBuf,
    pub results_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            prompts: PathBuf::from("config/prompts.json"),
            models: PathBuf::from("config/models.json"),
            evaluation_prompt: PathBuf::from("config/evaluation_prompt.txt"),
            cache_dir: PathBuf::from("cache"),
            results_dir: PathBuf::from("results"),
        }
    }
}

/// Model used to evaluate each tested model's responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub model: String,
    pub backend: Option<LLMBackend>,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_JUDGE_MODEL.to_string(),
            backend: None,
        }
    }
}

impl JudgeConfig {
    pub fn spec(&self) -> ModelSpec {
        ModelSpec {
            name: self.model.clone(),
            backend: self.backend,
        }
    }
}

/// Judge model and instruction for the cross-evaluation comparison.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub model: String,
    pub backend: Option<LLMBackend>,
    pub instruction: String,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_JUDGE_MODEL.to_string(),
            backend: None,
            instruction: DEFAULT_COMPARISON_INSTRUCTION.to_string(),
        }
    }
}

impl ComparisonConfig {
    pub fn spec(&self) -> ModelSpec {
        ModelSpec {
            name: self.model.clone(),
            backend: self.backend,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub system_prompt: String,
    pub user_query: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_PROBE_SYSTEM_PROMPT.to_string(),
            user_query: DEFAULT_PROBE_USER_QUERY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendsConfig {
    /// Backend serving models that do not name one.
    pub default: LLMBackend,
    pub ollama: OllamaSettings,
    pub openai: OpenAISettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OllamaSettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenAISettings {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_key_env: Some(DEFAULT_OPENAI_KEY_ENV.to_string()),
            timeout_seconds: None,
        }
    }
}

impl OpenAISettings {
    /// Inline key first, then the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| {
                self.api_key_env
                    .as_deref()
                    .and_then(|name| std::env::var(name).ok())
            })
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log to this file instead of stderr.
    pub path: Option<PathBuf>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [judge]
            model = "gpt-4o"
            backend = "openai"

            [paths]
            results_dir = "out"
            "#,
        )
        .unwrap();

        assert_eq!(config.judge.model, "gpt-4o");
        assert_eq!(config.judge.backend, Some(LLMBackend::OpenAI));
        assert_eq!(config.paths.results_dir, PathBuf::from("out"));
        assert_eq!(config.paths.cache_dir, PathBuf::from("cache"));
        assert_eq!(config.comparison.model, DEFAULT_JUDGE_MODEL);
        assert_eq!(config.backends.default, LLMBackend::Ollama);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn inline_api_key_wins_over_env() {
        let settings = OpenAISettings {
            api_key: Some("sk-inline".into()),
            api_key_env: Some("LLM_COMPARE_TEST_UNSET_VAR".into()),
            ..Default::default()
        };
        assert_eq!(settings.resolve_api_key().as_deref(), Some("sk-inline"));
    }

    #[test]
    fn missing_key_resolves_to_none() {
        let settings = OpenAISettings {
            api_key: Some(String::new()),
            api_key_env: Some("LLM_COMPARE_TEST_UNSET_VAR".into()),
            ..Default::default()
        };
        assert_eq!(settings.resolve_api_key(), None);
    }
}
