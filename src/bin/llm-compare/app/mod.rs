mod commands;

use std::process::ExitCode;

use clap::Parser;
use llm_compare::config::{load_config, AppConfig};
use llm_compare::PipelineError;

use crate::args::{CliArgs, Command, JudgeArgs};
use crate::logging::init_logging;

pub async fn run() -> ExitCode {
    let args = CliArgs::parse();
    match execute(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => exit_with(err),
    }
}

async fn execute(args: CliArgs) -> anyhow::Result<()> {
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, args.log_level.as_deref())?;
    if loaded.config_exists {
        log::debug!("Loaded config from {}", loaded.path.display());
    }

    let mut config = loaded.config;
    apply_overrides(&mut config, &args.command);

    match args.command {
        Command::Run { .. } => commands::run(&config).await,
        Command::Compare { .. } => commands::compare(&config).await,
        Command::Probe { models } => commands::probe(&config, &models).await,
    }
}

fn apply_overrides(config: &mut AppConfig, command: &Command) {
    match command {
        Command::Run {
            cache_dir,
            results_dir,
            judge,
        } => {
            if let Some(dir) = cache_dir {
                config.paths.cache_dir = dir.clone();
            }
            if let Some(dir) = results_dir {
                config.paths.results_dir = dir.clone();
            }
            override_judge(&mut config.judge.model, &mut config.judge.backend, judge);
        }
        Command::Compare { results_dir, judge } => {
            if let Some(dir) = results_dir {
                config.paths.results_dir = dir.clone();
            }
            override_judge(
                &mut config.comparison.model,
                &mut config.comparison.backend,
                judge,
            );
        }
        Command::Probe { .. } => {}
    }
}

fn override_judge(
    model: &mut String,
    backend: &mut Option<llm_compare::LLMBackend>,
    judge: &JudgeArgs,
) {
    if let Some(name) = &judge.judge {
        *model = name.clone();
    }
    if judge.judge_backend.is_some() {
        *backend = judge.judge_backend;
    }
}

fn exit_with(err: anyhow::Error) -> ExitCode {
    ExitCode::from(report_failure(&err))
}

/// Prints the failure to stdout and returns the exit status.
fn report_failure(err: &anyhow::Error) -> u8 {
    if let Some(pipeline) = err.downcast_ref::<PipelineError>() {
        if let PipelineError::NoInput(message) = pipeline {
            println!("{message}");
        } else {
            println!("Error: {pipeline}");
        }
        return pipeline.exit_code();
    }
    println!("Error: {err:#}");
    1
}
