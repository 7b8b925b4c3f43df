//! TOML configuration for the command-line estimator.
//!
//! ```toml
//! filing_status = "mfj"
//! state = "CA"
//! tables_dir = "tables/2025"
//!
//! [logging]
//! level = "info"
//! file = "tax-estimator.log"
//! stdout = true
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::FilingStatus;
use thiserror::Error;
use tracing::debug;

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tax-estimator.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unknown filing status '{0}' (expected S, MFJ, MFS, or HOH)")]
    InvalidFilingStatus(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// Default filing status for calculators that take one.
    #[serde(default)]
    pub filing_status: Option<String>,

    /// Default state code or name.
    #[serde(default)]
    pub state: Option<String>,

    /// Directory of replacement table CSV files.
    #[serde(default)]
    pub tables_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Level or EnvFilter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file, opened in append mode.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Echo log records to the terminal. Records go to stderr so that
    /// estimate output on stdout stays machine-readable.
    #[serde(default = "default_stdout")]
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            stdout: default_stdout(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_stdout() -> bool {
    true
}

impl CliConfig {
    pub fn from_toml_str(
        content: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Loads `explicit` when given (it must exist), otherwise
    /// [`DEFAULT_CONFIG_FILE`] when present, otherwise defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            return Self::load(default_path);
        }
        debug!("no config file; using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(status) = &self.filing_status
            && FilingStatus::parse(status).is_none()
        {
            return Err(ConfigError::InvalidFilingStatus(status.clone()));
        }
        Ok(())
    }
}
