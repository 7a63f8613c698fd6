//! Error types for idrplot

use thiserror::Error;

/// Result type alias for idrplot operations
pub type Result<T> = std::result::Result<T, IdrError>;

/// Main error type for idrplot
#[derive(Error, Debug)]
pub enum IdrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A dataset entry could not be turned into a protein record.
    ///
    /// `index` is 1-based within the dataset.
    #[error("Malformed record #{index}{}: {reason}", display_name(.name))]
    MalformedRecord {
        index: usize,
        name: Option<String>,
        reason: String,
    },

    #[error("Dataset contains no protein records")]
    EmptyDataset,

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Render error: {0}")]
    Render(String),
}

fn display_name(name: &Option<String>) -> String {
    name.as_deref().map(|n| format!(" ({n})")).unwrap_or_default()
}

impl IdrError {
    /// Create a malformed record error
    pub fn malformed(index: usize, name: Option<&str>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            name: name.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_names_offender() {
        let err = IdrError::malformed(3, Some("CHK1"), "field `psite` is not an integer: 'x'");
        assert_eq!(
            err.to_string(),
            "Malformed record #3 (CHK1): field `psite` is not an integer: 'x'"
        );
    }

    #[test]
    fn test_malformed_record_without_name() {
        let err = IdrError::malformed(7, None, "missing field `name`");
        assert_eq!(err.to_string(), "Malformed record #7: missing field `name`");
    }
}
