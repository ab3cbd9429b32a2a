//! Loaders for the static inputs of a run: prompts, models and instruction text.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backends::LLMBackend;

use super::error::ConfigError;

/// One prompt of the fixed prompt set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub id: String,
    pub text: String,
}

/// Prompts keyed by id, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSet {
    prompts: Vec<Prompt>,
}

impl PromptSet {
    /// Builds a set from `(id, text)` pairs. A repeated id replaces the earlier text.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::default();
        for (id, text) in pairs {
            set.insert(id.into(), text.into());
        }
        set
    }

    fn insert(&mut self, id: String, text: String) {
        match self.prompts.iter_mut().find(|p| p.id == id) {
            Some(existing) => existing.text = text,
            None => self.prompts.push(Prompt { id, text }),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.prompts
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prompt> {
        self.prompts.iter()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

/// A model to query, optionally pinned to a backend.
///
/// In the models file this is either a bare name or
/// `{"name": "...", "backend": "openai"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ModelEntry")]
pub struct ModelSpec {
    pub name: String,
    pub backend: Option<LLMBackend>,
}

impl ModelSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backend: None,
        }
    }

    pub fn on(mut self, backend: LLMBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn backend_or(&self, default: LLMBackend) -> LLMBackend {
        self.backend.unwrap_or(default)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        backend: Option<LLMBackend>,
    },
}

impl From<ModelEntry> for ModelSpec {
    fn from(entry: ModelEntry) -> Self {
        match entry {
            ModelEntry::Name(name) => ModelSpec::new(name),
            ModelEntry::Detailed { name, backend } => ModelSpec { name, backend },
        }
    }
}

/// Loads the prompt mapping from a JSON object of `id -> text`.
pub fn load_prompts(path: &Path) -> Result<PromptSet, ConfigError> {
    let raw = read_input(path)?;
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&raw).map_err(|err| parse_error(path, err))?;

    let mut prompts = PromptSet::default();
    for (id, value) in map {
        let serde_json::Value::String(text) = value else {
            return Err(ConfigError::Parse {
                path: path.to_path_buf(),
                message: format!("prompt {id} is not a string"),
            });
        };
        prompts.insert(id, text);
    }
    log::debug!("Loaded {} prompts from {}", prompts.len(), path.display());
    Ok(prompts)
}

/// Loads the list of models to test from a JSON array.
pub fn load_models(path: &Path) -> Result<Vec<ModelSpec>, ConfigError> {
    let raw = read_input(path)?;
    let models: Vec<ModelSpec> =
        serde_json::from_str(&raw).map_err(|err| parse_error(path, err))?;
    log::debug!("Loaded {} models from {}", models.len(), path.display());
    Ok(models)
}

/// Reads an instruction text file verbatim.
pub fn load_instruction(path: &Path) -> Result<String, ConfigError> {
    read_input(path)
}

fn read_input(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })
}

fn parse_error(path: &Path, err: serde_json::Error) -> ConfigError {
    ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn prompts_keep_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        fs::write(&path, r#"{"2": "second", "1": "first", "10": "tenth"}"#).unwrap();

        let prompts = load_prompts(&path).unwrap();
        let ids: Vec<&str> = prompts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "1", "10"]);
        assert_eq!(prompts.get("1"), Some("first"));
    }

    #[test]
    fn missing_prompt_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load_prompts(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_prompts_are_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        fs::write(&path, r#"["not", "a", "map"]"#).unwrap();
        assert!(matches!(
            load_prompts(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));

        fs::write(&path, r#"{"1": 42}"#).unwrap();
        assert!(matches!(
            load_prompts(&path).unwrap_err(),
            ConfigError::Parse { ref message, .. } if message.contains("prompt 1")
        ));
    }

    #[test]
    fn repeated_ids_keep_last_text() {
        let prompts = PromptSet::from_pairs([("1", "a"), ("2", "b"), ("1", "c")]);
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts.get("1"), Some("c"));
    }

    #[test]
    fn models_accept_names_and_objects() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.json");
        fs::write(
            &path,
            r#"["llama3:8b", {"name": "gpt-4o-mini", "backend": "openai"}, {"name": "phi3"}]"#,
        )
        .unwrap();

        let models = load_models(&path).unwrap();
        assert_eq!(
            models,
            vec![
                ModelSpec::new("llama3:8b"),
                ModelSpec::new("gpt-4o-mini").on(LLMBackend::OpenAI),
                ModelSpec::new("phi3"),
            ]
        );
        assert_eq!(models[0].backend_or(LLMBackend::Ollama), LLMBackend::Ollama);
    }

    #[test]
    fn instruction_is_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("evaluation_prompt.txt");
        fs::write(&path, "Rate each answer.\n").unwrap();
        assert_eq!(load_instruction(&path).unwrap(), "Rate each answer.\n");
        assert!(matches!(
            load_instruction(&dir.path().join("nope.txt")).unwrap_err(),
            ConfigError::NotFound(_)
        ));
    }
}
