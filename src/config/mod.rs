//! Configuration system for yit.
//!
//! Settings are read from a TOML file and can be overridden per invocation
//! from the command line.
//!
//! # Example
//!
//! ```
//! use yit::config::{Config, OutputFormat};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.output_format, OutputFormat::Value);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     ..Config::default()
//! };
//! assert!(!custom.document_separators);
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How query results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Scalars as bare text, collections as YAML
    #[default]
    Value,
    /// Every result as a YAML document
    Yaml,
    /// Every result as one line of JSON
    Json,
}

/// Configuration for the yit command.
///
/// # Fields
///
/// * `output_format` - How results are printed (default: `value`)
/// * `document_separators` - Print `---` between the results of each input document (default: false)
/// * `default_query` - Query used when none is given on the command line (default: empty, the identity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// How results are printed
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Print `---` between documents
    #[serde(default)]
    pub document_separators: bool,

    /// Query used when none is given
    #[serde(default)]
    pub default_query: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Value,
            document_separators: false,
            default_query: String::new(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yit/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yit");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Loads configuration from `path`, reporting any read or parse error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("output_format = \"yaml\"").unwrap();
        assert_eq!(config.output_format, OutputFormat::Yaml);
        assert!(!config.document_separators);
        assert!(config.default_query.is_empty());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(toml::from_str::<Config>("output_format = \"xml\"").is_err());
    }
}
