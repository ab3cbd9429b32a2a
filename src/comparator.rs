//! Cross-evaluation: one judge call over every evaluation report.

use std::path::{Path, PathBuf};

use crate::{
    chat::ChatMessage,
    config::ModelSpec,
    error::PipelineError,
    registry::ProviderRegistry,
    report::{self, ReportFile},
};

pub const NO_EVALUATIONS: &str = "No evaluation files found.";

pub struct Comparator {
    judge: ModelSpec,
    instruction: String,
}

impl Comparator {
    pub fn new(judge: ModelSpec, instruction: impl Into<String>) -> Self {
        Self {
            judge,
            instruction: instruction.into(),
        }
    }

    pub fn build_messages(&self, reports: &[ReportFile]) -> Vec<ChatMessage> {
        std::iter::once(ChatMessage::system().content(&self.instruction).build())
            .chain(reports.iter().map(|report| {
                ChatMessage::user()
                    .content(format!(
                        "Evaluation file: {}\n---\n{}",
                        report.name, report.content
                    ))
                    .build()
            }))
            .collect()
    }

    /// Asks the judge to compare `reports`. Fails with `NoInput` when empty.
    pub async fn compare(
        &self,
        registry: &ProviderRegistry,
        reports: &[ReportFile],
    ) -> Result<String, PipelineError> {
        if reports.is_empty() {
            return Err(PipelineError::NoInput(NO_EVALUATIONS.to_string()));
        }
        log::info!("Comparing {} evaluations with {}", reports.len(), self.judge.name);
        let messages = self.build_messages(reports);
        Ok(registry.complete(&self.judge, &messages).await?)
    }

    /// Compares every evaluation in `results_dir` and writes a comparison report.
    pub async fn run(
        &self,
        registry: &ProviderRegistry,
        results_dir: &Path,
    ) -> Result<PathBuf, PipelineError> {
        let reports = report::collect_evaluations(results_dir).await?;
        let comparison = self.compare(registry, &reports).await?;
        let path = report::write_comparison(results_dir, &comparison).await?;
        log::info!("Comparison summary saved to: {}", path.display());
        Ok(path)
    }
}
