//! Command line arguments.

use casegraph_common::{LogFormat, LoggingConfig, Result};
use casegraph_config::{Config, ConfigLoader};
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Country to chart, matched exactly against the feed
    #[arg(long)]
    pub country: Option<String>,

    /// Output image path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level filter, e.g. `info` or `casegraph_data=debug`
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Apply flags on top of a loaded configuration.
    ///
    /// Flags win over both the file and `CASEGRAPH_*` variables.
    pub fn apply(&self, config: &mut Config) {
        if let Some(country) = &self.country {
            config.data.country.clone_from(country);
        }
        if let Some(output) = &self.output {
            config.chart.output.clone_from(output);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }

    /// Load the configuration, apply flags, then validate the result once.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = ConfigLoader::load_unvalidated(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Logging setup for the resolved configuration.
    pub fn logging_config(config: &Config) -> Result<LoggingConfig> {
        let format: LogFormat = config.logging.format.parse()?;
        Ok(LoggingConfig {
            level: config.logging.level.clone(),
            format,
            ..LoggingConfig::default()
        })
    }
}
