//! Error and warning types for dependency resolution

use source_bsp::BspError;
use source_mdl::MdlError;
use source_vmt::VmtError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop a resolution
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A placement or entity asked for a skin the model does not have
    #[error("Invalid skin {skin} in {model}")]
    InvalidSkin {
        /// Relative model path
        model: String,
        /// Requested skin
        skin: u32,
    },

    /// A material could not be tokenized
    #[error("Failed to parse material {}: {source}", path.display())]
    Material {
        /// Location of the material
        path: PathBuf,
        /// Tokenizer error
        source: VmtError,
    },

    /// A model's tables are inconsistent with its size
    #[error("Failed to parse model {}: {source}", path.display())]
    Model {
        /// Location of the model
        path: PathBuf,
        /// Parser error
        source: MdlError,
    },

    /// The map itself is unreadable or malformed
    #[error("Failed to read map: {0}")]
    Map(#[from] BspError),

    /// A located file could not be read
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// A deny list line is not a valid regular expression
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending line
        pattern: String,
        /// Regex compile error
        source: regex::Error,
    },
}

/// Result type using ResolveError
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Non-fatal findings handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A resolved file is at or above the size threshold
    LargeFile {
        /// Relative path
        path: String,
        /// Size in bytes
        size: u64,
    },
    /// A configuration file was ignored
    Config(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LargeFile { path, size } => write!(f, "{} is {} KB", path, size / 1000),
            Self::Config(message) => write!(f, "{}", message),
        }
    }
}
