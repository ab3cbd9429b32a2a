use llm_compare::comparator::Comparator;
use llm_compare::config::{load_models, AppConfig, ModelSpec};
use llm_compare::orchestrator::{Orchestrator, RunInputs};
use llm_compare::probe::SystemPromptProbe;
use llm_compare::registry::ProviderRegistry;
use llm_compare::PipelineError;

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let inputs = RunInputs::load(&config.paths)?;
    let registry = registry(config)?;
    let orchestrator = Orchestrator::from_config(config, registry, inputs.instructions.clone());
    orchestrator
        .run_with(&inputs.models, &inputs.prompts, |record| {
            println!("Evaluation saved to: {}", record.path.display());
        })
        .await?;
    Ok(())
}

pub async fn compare(config: &AppConfig) -> anyhow::Result<()> {
    let registry = registry(config)?;
    let comparator = Comparator::new(config.comparison.spec(), &config.comparison.instruction);
    let path = comparator.run(&registry, &config.paths.results_dir).await?;
    println!("Comparison summary saved to: {}", path.display());
    Ok(())
}

pub async fn probe(config: &AppConfig, names: &[String]) -> anyhow::Result<()> {
    let models = if names.is_empty() {
        load_models(&config.paths.models).map_err(PipelineError::from)?
    } else {
        names.iter().map(|name| ModelSpec::new(name.as_str())).collect()
    };
    let registry = registry(config)?;
    let probe = SystemPromptProbe::from_config(&config.probe);
    for model in &models {
        let outcome = probe.probe(&registry, model).await.map_err(PipelineError::from)?;
        println!("\n--- Testing {} WITHOUT system prompt ---", outcome.model);
        println!("{}", outcome.without_system);
        println!("\n--- Testing {} WITH system prompt ---", outcome.model);
        println!("{}", outcome.with_system);
    }
    Ok(())
}

fn registry(config: &AppConfig) -> Result<ProviderRegistry, PipelineError> {
    Ok(ProviderRegistry::from_config(&config.backends)?)
}
