//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Commented template written by `generate-config`
pub const CONFIG_TEMPLATE: &str = r#"# pyralign configuration

[alignment]
# Separator pattern used when a pyramid file has no <startDocumentRegEx>.
# Each match starts a new reference summary; the last "."-separated segment
# of the match is the summarizer id.
# default_document_regex = '-{10}\nD\d+\.M\.\d+\.[A-Z]\.[A-Z]\n-{10}'

[output]
# text, json or markdown
default_format = "text"

# Indent JSON output
pretty_json = true

# Include recoverable build diagnostics in the emitted records
include_diagnostics = false
"#;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Alignment configuration
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Alignment-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct AlignmentConfig {
    /// Fallback separator pattern for pyramids without `startDocumentRegEx`
    #[serde(default)]
    pub default_document_regex: Option<String>,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Include diagnostics in output
    pub include_diagnostics: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            pretty_json: true,
            include_diagnostics: false,
        }
    }
}

impl CliConfig {
    /// Parse a TOML configuration document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_template_round_trips_to_defaults() {
        let config = CliConfig::from_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = CliConfig::from_toml(
            r#"
[output]
default_format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.output.default_format, OutputFormat::Json);
        assert!(config.output.pretty_json);
        assert!(config.alignment.default_document_regex.is_none());
    }

    #[test]
    fn test_literal_regex_survives() {
        let config = CliConfig::from_toml(
            r#"
[alignment]
default_document_regex = '== \w+ =='
"#,
        )
        .unwrap();
        assert_eq!(config.alignment.default_document_regex.as_deref(), Some(r"== \w+ =="));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = CliConfig::from_toml("[output]\ndefault_format = \"yaml\"\n").unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::ConfigError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[output]\ninclude_diagnostics = true\n").unwrap();

        let config = CliConfig::load_or_default(Some(file.path())).unwrap();
        assert!(config.output.include_diagnostics);

        assert!(CliConfig::load(Path::new("/nonexistent/pyralign.toml")).is_err());
        assert_eq!(CliConfig::load_or_default(None).unwrap(), CliConfig::default());
    }
}
