//! Error types for the report pipeline.
//!
//! Each pipeline stage surfaces its own failure kind so callers can tell a
//! bad document from a bad model response from a bad output path.

use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Report pipeline error type
#[derive(Error, Debug)]
pub enum ReportError {
    /// Document could not be read or yielded no text
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Text-generation service call failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Service responded, but not with the JSON we asked for
    #[error("Malformed service response: {detail}")]
    MalformedResponse {
        /// What was wrong with the payload
        detail: String,
    },

    /// Generated tables do not fit the declared sheet schema
    #[error("Unexpected shape in sheet '{sheet}': {detail}")]
    UnexpectedShape {
        /// Sheet the offending data was returned under
        sheet: String,
        /// Which column or row violated the schema
        detail: String,
    },

    /// Workbook could not be written
    #[error("Write failed: {0}")]
    Write(String),

    /// IO errors from document access
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::MalformedResponse {
            detail: e.to_string(),
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(e: reqwest::Error) -> Self {
        ReportError::Generation(e.to_string())
    }
}
