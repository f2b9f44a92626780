//! Error handling for BSP parsing

use std::io;
use thiserror::Error;

/// Errors that can occur when reading a BSP map
#[derive(Debug, Error)]
pub enum BspError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic value in the file header
    #[error("Invalid magic value: expected '{expected}', found '{found}'")]
    InvalidMagic {
        /// The expected magic value
        expected: String,
        /// The actual magic value found
        found: String,
    },

    /// Lump id outside the lump directory
    #[error("Lump {0} is outside the lump directory")]
    InvalidLumpId(usize),

    /// Lump directory entry pointing outside the file
    #[error("Lump {id} has invalid bounds (offset {offset}, length {length})")]
    InvalidLumpBounds {
        /// Lump id (or game lump id)
        id: i64,
        /// Recorded file offset
        offset: i32,
        /// Recorded length
        length: i32,
    },

    /// Error when parsing lump contents
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The embedded pak file could not be read
    #[error("Pak file error: {0}")]
    PakFile(#[from] zip::result::ZipError),
}

/// Type alias for Results from BSP operations
pub type Result<T> = std::result::Result<T, BspError>;
