//! Error types for VMT parsing

use thiserror::Error;

/// Errors that can occur when tokenizing a VMT document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmtError {
    /// A double quote was opened but never closed
    #[error("No closing quotation for quote opened on line {line}")]
    UnterminatedQuote {
        /// 1-based line of the opening quote
        line: usize,
    },
}

/// Result type using VmtError
pub type Result<T> = std::result::Result<T, VmtError>;
