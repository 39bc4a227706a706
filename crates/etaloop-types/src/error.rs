//! Error types for etaloop.

use thiserror::Error;

/// Result type alias for report rendering and parsing.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while rendering or parsing a report.
///
/// Computing a report never fails; only its text forms can.
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a rendered report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendered JSON was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A duration string did not match `H:MM:SS[.ffffff]`.
    #[error("invalid duration '{0}', expected H:MM:SS.ffffff")]
    InvalidDuration(String),
}
