use crate::error::ConfigError;
use core_types::EconomicsModel;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod overrides;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use overrides::ConfigOverrides;
pub use settings::{Config, LoggingSettings, ReportSettings};

/// Prefix of environment variables that override file values, e.g.
/// `SETTLEMENT__REPORT__TAX_REGIME=usn15`.
pub const ENV_PREFIX: &str = "SETTLEMENT";

/// Loads the application configuration from `settlement.toml`, if present,
/// layered under `SETTLEMENT__*` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(None)
}

/// Like [`load_config`], but reads the given file instead. An explicit path
/// must exist.
pub fn load_config_from(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("settlement").required(false),
    };
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

    finish(builder)
}

/// Reads a standalone projector model, laid out like the `[economics]` section
/// but at the top level of its own file.
pub fn load_model(path: &Path) -> Result<EconomicsModel, ConfigError> {
    config::Config::builder()
        .add_source(config::File::from(path).required(true))
        .build()
        .and_then(|raw| raw.try_deserialize::<EconomicsModel>())
        .map_err(|source| ConfigError::ModelError {
            path: path.to_path_buf(),
            source,
        })
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        tax_regime = %config.report.tax_regime,
        log_level = %config.logging.level,
        "Configuration loaded."
    );
    Ok(config)
}
