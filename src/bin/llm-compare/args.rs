use clap::{Parser, Subcommand};
use llm_compare::LLMBackend;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "llm-compare",
    version,
    about = "Query LLMs with a fixed prompt set and let a judge model evaluate them"
)]
pub struct CliArgs {
    /// TOML config file (defaults to ./llm-compare.toml when present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `llm_compare=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Query every model, cache the answers and write one evaluation per model
    Run {
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        #[arg(long)]
        results_dir: Option<PathBuf>,
        #[command(flatten)]
        judge: JudgeArgs,
    },
    /// Compare every evaluation in the results directory
    Compare {
        #[arg(long)]
        results_dir: Option<PathBuf>,
        #[command(flatten)]
        judge: JudgeArgs,
    },
    /// Ask each model the probe question with and without a system prompt
    Probe {
        /// Models to probe instead of the models file
        #[arg(long = "model", short = 'm')]
        models: Vec<String>,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct JudgeArgs {
    /// Judge model name
    #[arg(long)]
    pub judge: Option<String>,
    /// Backend serving the judge model
    #[arg(long)]
    pub judge_backend: Option<LLMBackend>,
}
