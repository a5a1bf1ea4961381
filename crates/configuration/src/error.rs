use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while reading `settlement.toml`, its
/// `SETTLEMENT__*` overrides or a standalone product model.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settlement configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Failed to read product model {}: {source}", .path.display())]
    ModelError {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("Invalid settlement configuration: {0}")]
    ValidationError(String),
}
