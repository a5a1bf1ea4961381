use crate::settings::Config;
use core_types::TaxRegime;
use std::path::PathBuf;

/// Command-line values that take precedence over the file and the environment.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ConfigOverrides {
    /// Path to a TOML configuration file (default: ./settlement.toml, if present).
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `analytics=debug,info`.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub log_level: Option<String>,

    /// Tax regime: usn6 or usn15.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub tax: Option<TaxRegime>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(regime) = self.tax {
            config.report.tax_regime = regime;
            config.economics.tax_regime = regime;
        }
    }
}
