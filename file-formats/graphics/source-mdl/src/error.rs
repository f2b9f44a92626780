//! Error types for MDL parsing

use std::io;
use thiserror::Error;

/// Error types for MDL parsing
#[derive(Error, Debug)]
pub enum MdlError {
    /// I/O Error during reading
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A header field holds a value that cannot be valid
    #[error("Invalid header field {field}: {value}")]
    InvalidHeader {
        /// Name of the header field
        field: &'static str,
        /// Value found in the file
        value: i32,
    },

    /// A table or string lies outside the file
    #[error("{what} at offset {offset} lies outside the {len} byte file")]
    OutOfBounds {
        /// What was being read
        what: &'static str,
        /// Offset that was requested
        offset: i64,
        /// Length of the file
        len: usize,
    },

    /// A skin was requested that the model does not define
    #[error("Invalid skin {skin}: the model has {families} skin families")]
    InvalidSkin {
        /// Requested skin
        skin: u32,
        /// Number of skin families in the model
        families: usize,
    },
}

/// Result type using MdlError
pub type Result<T> = std::result::Result<T, MdlError>;
