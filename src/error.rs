// Error taxonomy
// Validation errors are recoverable (re-prompt or reject), persistence errors are
// caught at the store boundary and reported.

use std::path::PathBuf;
use thiserror::Error;

/// A raw value rejected by one of the field validators.
///
/// Every variant carries the offending input; `Display` is the message shown to
/// the user before re-prompting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid city: {0}")]
    InvalidCity(String),

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid report type: {0}")]
    InvalidReportType(String),

    #[error("Invalid budget format: {0}. Use format like $4.81m or $500k")]
    InvalidBudget(String),

    #[error("Invalid date range: {value}. {reason}")]
    InvalidDateRange { value: String, reason: String },

    #[error("Invalid state address: {0}")]
    InvalidStateAddress(String),

    #[error("Invalid amount: {0}. Must be a non-negative number")]
    InvalidAmount(String),
}

impl ValidationError {
    /// The raw value that failed validation
    pub fn value(&self) -> &str {
        match self {
            ValidationError::InvalidChoice(v)
            | ValidationError::InvalidCategory(v)
            | ValidationError::InvalidState(v)
            | ValidationError::InvalidCity(v)
            | ValidationError::InvalidYear(v)
            | ValidationError::InvalidStatus(v)
            | ValidationError::InvalidReportType(v)
            | ValidationError::InvalidBudget(v)
            | ValidationError::InvalidStateAddress(v)
            | ValidationError::InvalidAmount(v) => v,
            ValidationError::InvalidDateRange { value, .. } => value,
        }
    }
}

/// Failure while reading or writing one of the persisted snapshots.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("File {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    /// Classify an I/O error, keeping "not found" distinct so callers can fall back
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PersistenceError::NotFound(path)
        } else {
            PersistenceError::Io { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistenceError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_carries_value() {
        let err = ValidationError::InvalidCategory("Nuclear".to_string());
        assert_eq!(err.to_string(), "Invalid category: Nuclear");
        assert_eq!(err.value(), "Nuclear");
    }

    #[test]
    fn test_budget_message_includes_hint() {
        let err = ValidationError::InvalidBudget("4.81m".to_string());
        assert!(err.to_string().contains("$4.81m or $500k"));
    }

    #[test]
    fn test_not_found_is_classified() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = PersistenceError::from_io("projects.json", io);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "File projects.json not found");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PersistenceError::from_io("projects.json", io);
        assert!(!err.is_not_found());
    }
}
