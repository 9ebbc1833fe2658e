//! Error types for pomo.

use thiserror::Error;

/// Errors that can occur in pomo.
#[derive(Error, Debug)]
pub enum PomoError {
    /// Configuration or environment problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `SQLite` storage failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem or process I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PomoError {
    /// Stable label for log fields.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Database(_) => "database",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PomoError::InvalidInput("duration must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: duration must be positive");
        assert_eq!(err.label(), "invalid_input");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<u32, _> = serde_json::from_str("not json");
        let err: PomoError = parse.unwrap_err().into();
        assert_eq!(err.label(), "parse");
    }
}
