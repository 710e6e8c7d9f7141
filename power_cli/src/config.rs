//! CLI configuration, read from `power_cli.toml`.
//!
//! ```toml
//! log_level = "info"
//! output = "json"
//! precision = 4
//! strict_closure_sum = false
//! ```
//!
//! Every key is optional. A missing file means defaults; command-line flags
//! override the file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use power_core::format::MAX_PRECISION;
use power_core::EvaluationOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "power_cli.toml";

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key: value` lines
    #[default]
    Text,
    /// Pretty-printed JSON envelope
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log filter when `RUST_LOG` is not set
    pub log_level: String,
    pub output: OutputFormat,
    /// Decimals in results; unset uses each calculator's default
    pub precision: Option<u32>,
    /// Require composition sums to be exactly 100
    pub strict_closure_sum: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            output: OutputFormat::Text,
            precision: None,
            strict_closure_sum: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {path}: precision {precision} exceeds {max} decimals")]
    Precision { path: PathBuf, precision: u32, max: u32 },
}

impl CliConfig {
    /// Evaluation options implied by this configuration
    pub fn evaluation_options(&self) -> EvaluationOptions {
        let mut options = if self.strict_closure_sum {
            EvaluationOptions::strict()
        } else {
            EvaluationOptions::default()
        };
        options.precision = self.precision;
        options
    }
}

/// Load the config at `path`, or defaults when the file does not exist.
pub fn load_or_default(path: &Path) -> Result<CliConfig, ConfigError> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: CliConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    check_precision(path, &config)?;
    Ok(config)
}

fn check_precision(path: &Path, config: &CliConfig) -> Result<(), ConfigError> {
    match config.precision {
        Some(precision) if precision > MAX_PRECISION => Err(ConfigError::Precision {
            path: path.to_path_buf(),
            precision,
            max: MAX_PRECISION,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_or_default(Path::new("definitely/not/here/power_cli.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config: CliConfig = toml::from_str("output = \"json\"\nprecision = 4\n").unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.precision, Some(4));
        assert_eq!(config.log_level, "warn");
        assert!(!config.strict_closure_sum);
    }

    #[test]
    fn test_strict_options() {
        let config = CliConfig {
            strict_closure_sum: true,
            precision: Some(3),
            ..CliConfig::default()
        };
        let options = config.evaluation_options();
        assert_eq!(options.closure_tolerance, 0.0);
        assert_eq!(options.precision, Some(3));
    }

    #[test]
    fn test_precision_limit() {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        let config: CliConfig = toml::from_str("precision = 4294967295\n").unwrap();
        assert!(matches!(
            check_precision(path, &config),
            Err(ConfigError::Precision { precision: u32::MAX, .. })
        ));

        let config: CliConfig = toml::from_str("precision = 17\n").unwrap();
        assert!(check_precision(path, &config).is_ok());
    }

    #[test]
    fn test_unknown_output_rejected() {
        let result: Result<CliConfig, _> = toml::from_str("output = \"yaml\"\n");
        assert!(result.is_err());
    }
}
