//! Compare language models on a fixed prompt set.
//!
//! Each tested model answers every prompt once (answers are cached on disk),
//! a judge model evaluates the whole answer set, and a final judge call can
//! compare all evaluations to pick a winner.
//!
//! ```no_run
//! use llm_compare::{
//!     config::{load_config, AppConfig},
//!     orchestrator::{Orchestrator, RunInputs},
//!     registry::ProviderRegistry,
//! };
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config: AppConfig = load_config(None)?.config;
//! let inputs = RunInputs::load(&config.paths)?;
//! let registry = ProviderRegistry::from_config(&config.backends)?;
//! let orchestrator = Orchestrator::from_config(&config, registry, inputs.instructions.clone());
//! for record in orchestrator.run(&inputs.models, &inputs.prompts).await? {
//!     println!("{} -> {}", record.model, record.path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod cache;
pub mod chat;
pub mod comparator;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod orchestrator;
pub mod probe;
pub mod registry;
pub mod report;

#[cfg(test)]
pub(crate) mod test_support;

pub use backends::LLMBackend;
pub use error::{LLMError, PipelineError};
