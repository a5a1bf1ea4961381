use crate::error::ConfigError;
use core_types::{EconomicsModel, TaxRegime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportSettings,
    pub logging: LoggingSettings,
    /// Starting model for the unit-economics projector.
    pub economics: EconomicsModel,
}

/// Parameters applied when reconciling a settlement report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub tax_regime: TaxRegime,
    /// Cumulative profit share (percent) closing tier A.
    pub abc_a_threshold_pct: Decimal,
    /// Cumulative profit share (percent) closing tier B.
    pub abc_b_threshold_pct: Decimal,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            tax_regime: TaxRegime::Usn6,
            abc_a_threshold_pct: dec!(80),
            abc_b_threshold_pct: dec!(95),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. `info` or `analytics=debug,info`.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "settlement.log".to_string(),
        }
    }
}

impl Config {
    /// Checks the values serde cannot: the log filter syntax and the file sink name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        tracing_subscriber::EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::ValidationError(format!(
                "logging.level '{}' is not a valid filter: {e}",
                self.logging.level
            ))
        })?;

        if self.logging.directory.is_some() && self.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file_prefix must not be empty when logging.directory is set".to_string(),
            ));
        }
        Ok(())
    }
}
