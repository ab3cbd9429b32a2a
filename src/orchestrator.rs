//! The per-model loop: resolve every prompt through the cache, then evaluate.

use std::path::PathBuf;

use crate::{
    cache::ResponseCache,
    chat::ChatMessage,
    config::{load_instruction, load_models, load_prompts, AppConfig, ModelSpec, PathsConfig, PromptSet},
    error::PipelineError,
    evaluator::{Evaluator, Responses},
    registry::ProviderRegistry,
    report,
};

/// Everything a run reads before the first inference call.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub prompts: PromptSet,
    pub models: Vec<ModelSpec>,
    pub instructions: String,
}

impl RunInputs {
    pub fn load(paths: &PathsConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            prompts: load_prompts(&paths.prompts)?,
            models: load_models(&paths.models)?,
            instructions: load_instruction(&paths.evaluation_prompt)?,
        })
    }
}

/// Where a model's evaluation was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRecord {
    pub model: String,
    pub path: PathBuf,
}

pub struct Orchestrator {
    registry: ProviderRegistry,
    cache: ResponseCache,
    evaluator: Evaluator,
    results_dir: PathBuf,
}

impl Orchestrator {
    pub fn new(
        registry: ProviderRegistry,
        cache: ResponseCache,
        evaluator: Evaluator,
        results_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            cache,
            evaluator,
            results_dir: results_dir.into(),
        }
    }

    /// Wires an orchestrator from config, judging with `[judge]` and `instructions`.
    pub fn from_config(
        config: &AppConfig,
        registry: ProviderRegistry,
        instructions: impl Into<String>,
    ) -> Self {
        Self::new(
            registry,
            ResponseCache::new(&config.paths.cache_dir),
            Evaluator::new(config.judge.spec(), instructions),
            &config.paths.results_dir,
        )
    }

    /// Queries, caches and evaluates every model in turn.
    ///
    /// Stops at the first failure. Responses cached before the failure are
    /// reused by the next run.
    pub async fn run(
        &self,
        models: &[ModelSpec],
        prompts: &PromptSet,
    ) -> Result<Vec<EvaluationRecord>, PipelineError> {
        self.run_with(models, prompts, |_| {}).await
    }

    /// Like [`Orchestrator::run`], calling `on_saved` as soon as each
    /// model's evaluation is written.
    pub async fn run_with<F>(
        &self,
        models: &[ModelSpec],
        prompts: &PromptSet,
        mut on_saved: F,
    ) -> Result<Vec<EvaluationRecord>, PipelineError>
    where
        F: FnMut(&EvaluationRecord),
    {
        if prompts.is_empty() {
            return Err(PipelineError::NoInput("No prompts configured.".to_string()));
        }
        if models.is_empty() {
            return Err(PipelineError::NoInput("No models configured.".to_string()));
        }

        let mut records = Vec::with_capacity(models.len());
        for model in models {
            let record = self.run_model(model, prompts).await?;
            on_saved(&record);
            records.push(record);
        }
        Ok(records)
    }

    pub async fn run_model(
        &self,
        model: &ModelSpec,
        prompts: &PromptSet,
    ) -> Result<EvaluationRecord, PipelineError> {
        let responses = self.collect_responses(model, prompts).await?;
        let evaluation = self
            .evaluator
            .evaluate(&self.registry, &model.name, &responses, prompts)
            .await?;
        let path = report::write_evaluation(&self.results_dir, &model.name, &evaluation).await?;
        log::info!("Evaluation saved to: {}", path.display());
        Ok(EvaluationRecord {
            model: model.name.clone(),
            path,
        })
    }

    /// Returns `model`'s response to every prompt, querying only on cache misses.
    pub async fn collect_responses(
        &self,
        model: &ModelSpec,
        prompts: &PromptSet,
    ) -> Result<Responses, PipelineError> {
        let mut responses = Vec::with_capacity(prompts.len());
        for prompt in prompts.iter() {
            let response = self
                .cache
                .get_or_create(&model.name, &prompt.id, &prompt.text, |text| async move {
                    log::info!("Querying {} with prompt {}...", model.name, prompt.id);
                    let messages = [ChatMessage::user().content(text).build()];
                    Ok::<_, PipelineError>(self.registry.complete(model, &messages).await?)
                })
                .await?;
            responses.push((prompt.id.clone(), response));
        }
        Ok(responses)
    }
}
