//! Reader for Source engine BSP map files.
//!
//! This crate reads the parts of a compiled map that reference external
//! content:
//!
//! - the entity lump (lump 0), parsed into key/value [`Entity`] blocks
//! - the material name table (lump 43)
//! - the static prop lump inside the game lump (lump 35)
//! - the embedded pak file (lump 40)
//!
//! # Examples
//!
//! ```no_run
//! use source_bsp::BspReader;
//!
//! let mut bsp = BspReader::open("maps/de_example.bsp").unwrap();
//! if let Some(props) = bsp.static_props().unwrap() {
//!     for prop in &props.props {
//!         println!("{} (skin {})", prop.model, prop.skin);
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod entities;
pub mod error;
pub mod header;
pub mod pakfile;
pub mod reader;
pub mod static_props;
pub mod texdata;

pub use entities::{Entity, parse_entities};
pub use error::{BspError, Result};
pub use header::{BspHeader, LumpEntry, LumpId};
pub use pakfile::PakFile;
pub use reader::BspReader;
pub use static_props::{GameLumpEntry, StaticProp, StaticPropLump};
