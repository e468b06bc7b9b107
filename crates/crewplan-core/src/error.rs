//! Error types for the Crewplan assignment engine.
//!
//! The engine deliberately has almost no failure modes: unmatched roles,
//! empty role fields, and members without roles are all normal no-op
//! conditions. The only caller-facing error class is malformed input.

use thiserror::Error;

/// Result type alias for Crewplan operations
pub type Result<T> = std::result::Result<T, CrewplanError>;

/// Error type for the assignment engine
#[derive(Error, Debug)]
pub enum CrewplanError {
    /// Malformed caller input (missing identifiers, duplicate member ids)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Roster (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors from roster load/save
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = CrewplanError::InvalidInput("task at position 2 has an empty id".to_string());
        assert!(err.to_string().contains("position 2"));
    }
}
