use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use llm_compare::config::LoggingConfig;

/// Starts logging to stderr, or to a rotated file when `path` is configured.
/// `RUST_LOG` wins over the configured level unless `--log-level` is given.
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> anyhow::Result<LoggerHandle> {
    let logger = match level_override {
        Some(level) => Logger::try_with_str(level)?,
        None => Logger::try_with_env_or_str(&config.level)?,
    };

    let Some(log_path) = config.path.as_ref() else {
        return Ok(logger.log_to_stderr().start()?);
    };

    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let basename = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("llm-compare")
        .to_string();
    let handle = logger
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    Ok(handle)
}
