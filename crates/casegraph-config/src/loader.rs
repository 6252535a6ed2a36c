//! Configuration loading with environment variable overrides.

use crate::schema::Config;
use casegraph_common::{CaseGraphError, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "CASEGRAPH_CONFIG_PATH";

/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "casegraph.yaml";

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from an explicit path, `CASEGRAPH_CONFIG_PATH`,
    /// `./casegraph.yaml`, or defaults, in that order, then apply environment
    /// overrides and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let config = Self::load_unvalidated(explicit)?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`load`](Self::load) without the validation pass, for callers
    /// that layer further overrides on top before validating.
    pub fn load_unvalidated(explicit: Option<&Path>) -> Result<Config> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                candidate.exists().then_some(candidate)
            });

        let mut config = match path {
            Some(path) => Self::read_file(&path)?,
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file without validating it.
    pub fn read_file(path: &Path) -> Result<Config> {
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            CaseGraphError::config_with_source(format!("Failed to read {}", path.display()), e)
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a YAML document; missing sections fall back to defaults.
    pub fn from_yaml(content: &str) -> Result<Config> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `CASEGRAPH_*` overrides using the given variable lookup.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CASEGRAPH_SOURCE_URL") {
            config.source.url = url;
        }

        if let Some(timeout) = lookup("CASEGRAPH_TIMEOUT_SECS") {
            config.source.timeout_secs = timeout.trim().parse().map_err(|e| {
                CaseGraphError::config_with_source(
                    format!("Failed to parse CASEGRAPH_TIMEOUT_SECS '{timeout}'"),
                    e,
                )
            })?;
        }

        if let Some(country) = lookup("CASEGRAPH_COUNTRY") {
            config.data.country = country;
        }

        if let Some(output) = lookup("CASEGRAPH_OUTPUT") {
            config.chart.output = PathBuf::from(output);
        }

        Ok(())
    }
}
