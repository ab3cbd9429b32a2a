use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("config IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
