use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BranchSuggestError, Result};
use crate::report::COMMENT_MARKER;
use crate::ticket::RepositoryRef;

/// Represents the complete configuration for branch-suggest.
///
/// Only the command-line layer reads it; the matching engine takes its inputs
/// as plain values.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_comment_marker() -> String {
    COMMENT_MARKER.to_string()
}

/// Settings for the rendered markdown report.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReportConfig {
    /// Marker used to find and replace a previously posted comment
    #[serde(default = "default_comment_marker")]
    pub comment_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            comment_marker: default_comment_marker(),
        }
    }
}

/// What the `match` command prints on stdout.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full pipeline document: ticket, match results and markdown
    #[default]
    Json,
    /// The markdown report only
    Markdown,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Fallbacks for values normally given on the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct DefaultsConfig {
    /// Repository ("owner/repo") used to filter fix-versions when none is given
    #[serde(default)]
    pub repository: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `branchsuggest.toml` in current directory
/// 3. `.branchsuggest.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./branchsuggest.toml").exists() {
        fs::read_to_string("./branchsuggest.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".branchsuggest.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| BranchSuggestError::config(e.to_string()))?;

    if config.report.comment_marker.trim().is_empty() {
        return Err(BranchSuggestError::config(
            "report.comment_marker must not be empty",
        ));
    }

    if let Some(repository) = &config.defaults.repository {
        RepositoryRef::parse(repository)?;
    }

    Ok(config)
}
