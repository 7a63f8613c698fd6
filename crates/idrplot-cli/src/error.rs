//! Error types for idrplot CLI
//!
//! Messages are user-facing and say what to do next where there is
//! something to do.

use idrplot_common::IdrError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Dataset loading, layout or rendering failed
    #[error(transparent)]
    Idr(#[from] IdrError),

    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// Output path or backend cannot be handled
    #[error("Unsupported output: {0}. Use an .svg, .png or .json file or pass --backend.")]
    UnsupportedOutput(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your config file or IDRPLOT_* environment variables.")]
    Config(String),

    /// Config file is not valid TOML
    #[error("Failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write delimited output: {0}")]
    Csv(#[from] csv::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unsupported output error
    pub fn unsupported_output(msg: impl Into<String>) -> Self {
        Self::UnsupportedOutput(msg.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_errors_pass_through() {
        let err: CliError = IdrError::malformed(2, Some("CHK1"), "missing field `psite`").into();
        assert_eq!(
            err.to_string(),
            "Malformed record #2 (CHK1): missing field `psite`"
        );
    }

    #[test]
    fn test_config_error_suggests_fix() {
        let err = CliError::config("width must be positive");
        assert!(err.to_string().contains("IDRPLOT_"));
    }
}
