//! Parser for the texture and skin tables of Source engine MDL files.
//!
//! Only the parts of a studio model that reference materials are read: the
//! texture records, the texture directories and the skin table. The skin
//! table is filtered so that a model placed with a fixed skin only pulls in
//! the materials that skin can display.
//!
//! # Examples
//!
//! ```no_run
//! use source_mdl::{MdlFile, SkinSelection};
//!
//! let data = std::fs::read("models/props/crate.mdl").unwrap();
//! let model = MdlFile::parse(&data).unwrap();
//! for name in model.material_names(&SkinSelection::single(1)).unwrap() {
//!     println!("materials/{}.vmt", name);
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod header;
pub mod model;
pub mod skin;

pub use error::{MdlError, Result};
pub use header::TextureHeader;
pub use model::{MdlFile, companion_files};
pub use skin::{SkinSelection, SkinTable};
