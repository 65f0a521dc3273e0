//! Error types for slideforge.

use thiserror::Error;

/// Main error type for slideforge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool arguments did not match the declared schema
    #[error("Invalid arguments for '{tool}': {}", violations.join("; "))]
    InvalidArguments {
        tool: String,
        violations: Vec<String>,
    },

    /// Tool name is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Build an [`Error::InvalidArguments`] for a single violation.
    pub fn invalid_argument(tool: &str, violation: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.to_string(),
            violations: vec![violation.into()],
        }
    }
}

/// Result type alias for slideforge operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments_lists_every_violation() {
        let err = Error::InvalidArguments {
            tool: "generate-presentation".to_string(),
            violations: vec![
                "\"topic\" is a required property".to_string(),
                "at /durationMinutes: \"ten\" is not of type \"integer\"".to_string(),
            ],
        };

        let message = err.to_string();
        assert!(message.starts_with("Invalid arguments for 'generate-presentation'"));
        assert!(message.contains("topic"));
        assert!(message.contains("durationMinutes"));
    }

    #[test]
    fn test_invalid_argument_helper() {
        let err = Error::invalid_argument("format-code", "code must not be empty");
        match err {
            Error::InvalidArguments { tool, violations } => {
                assert_eq!(tool, "format-code");
                assert_eq!(violations.len(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
