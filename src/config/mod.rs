mod error;
mod inputs;
mod load;
mod types;

pub use error::ConfigError;
pub use inputs::{load_instruction, load_models, load_prompts, ModelSpec, Prompt, PromptSet};
pub use load::{load_config, LoadedConfig, DEFAULT_CONFIG_FILE};
pub use types::{
    AppConfig, BackendsConfig, ComparisonConfig, JudgeConfig, LoggingConfig, OllamaSettings,
    OpenAISettings, PathsConfig, ProbeConfig, DEFAULT_COMPARISON_INSTRUCTION,
    DEFAULT_PROBE_SYSTEM_PROMPT, DEFAULT_PROBE_USER_QUERY,
};
