//! On-disk cache of model responses, one text file per (model, prompt).
//!
//! A non-empty file is a hit. There is no invalidation: a cached answer is
//! reused until someone deletes the file.

use std::future::Future;
use std::io;
use std::path::PathBuf;

const DEFAULT_EXTENSION: &str = "txt";

/// Model identifier with `:` replaced, usable as a directory name.
pub fn safe_model_name(model: &str) -> String {
    model.replace(':', "-")
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    root: PathBuf,
    extension: String,
}

impl ResponseCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn path_for(&self, model: &str, prompt_id: &str) -> PathBuf {
        self.root
            .join(safe_model_name(model))
            .join(format!("prompt_{prompt_id}.{}", self.extension))
    }

    /// Returns the cached response, treating an empty file as absent.
    pub async fn lookup(&self, model: &str, prompt_id: &str) -> io::Result<Option<String>> {
        let path = self.path_for(model, prompt_id);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() && meta.len() > 0 => {
                tokio::fs::read_to_string(&path).await.map(Some)
            }
            Ok(_) => Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Writes `response` as the cached answer, replacing any previous file.
    pub async fn store(&self, model: &str, prompt_id: &str, response: &str) -> io::Result<PathBuf> {
        let path = self.path_for(model, prompt_id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, response).await?;
        Ok(path)
    }

    /// Returns the cached response or produces, stores and returns a new one.
    ///
    /// `generate` is only called on a miss. If it fails nothing is written.
    pub async fn get_or_create<'a, F, Fut, E>(
        &self,
        model: &str,
        prompt_id: &str,
        prompt_text: &'a str,
        generate: F,
    ) -> Result<String, E>
    where
        F: FnOnce(&'a str) -> Fut,
        Fut: Future<Output = Result<String, E>>,
        E: From<io::Error>,
    {
        if let Some(cached) = self.lookup(model, prompt_id).await? {
            log::info!("Skipping {model} for prompt {prompt_id}, response already exists.");
            return Ok(cached);
        }

        let response = generate(prompt_text).await?;
        let path = self.store(model, prompt_id, &response).await?;
        log::debug!("Cached response at {}", path.display());
        Ok(response)
    }
}
