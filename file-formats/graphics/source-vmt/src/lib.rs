//! Support for Source engine VMT material files.
//!
//! Materials are KeyValues text documents. This crate tokenizes them, finds
//! the textures, materials and includes they refer to, and can shrink them
//! for packing.
//!
//! # Examples
//!
//! ```
//! use source_vmt::{MaterialReference, parse_references};
//!
//! let vmt = r#""LightmappedGeneric" { "$basetexture" "concrete/wall01" }"#;
//! let references = parse_references(vmt).unwrap();
//! assert_eq!(
//!     references,
//!     vec![MaterialReference::Texture("concrete/wall01".to_string())]
//! );
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod material;
pub mod minify;
pub mod tokenizer;

pub use error::{Result, VmtError};
pub use material::{MaterialReference, parse_references};
pub use minify::minify;
pub use tokenizer::tokenize;
