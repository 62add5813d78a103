//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// No input file matched
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// A pyramid or annotation could not be built
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CliError::FileNotFound("D0701.pyr".to_string());
        assert_eq!(error.to_string(), "File not found: D0701.pyr");

        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");

        let error = CliError::ConfigError("unknown format".to_string());
        assert_eq!(error.to_string(), "Configuration error: unknown format");

        let error = CliError::ProcessingError("2 of 3 files failed".to_string());
        assert_eq!(error.to_string(), "Processing error: 2 of 3 files failed");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let result: CliResult<()> = Err(CliError::ConfigError("bad".to_string()).into());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(msg)) if msg == "bad"
        ));
    }
}
