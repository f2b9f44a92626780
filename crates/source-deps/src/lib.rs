//! Dependency resolution for Source engine maps.
//!
//! Given a compiled map and the content directories it was built against,
//! this crate works out which custom files the map needs at runtime:
//! models and their companion files, materials, textures, sounds and a few
//! map specific extras. Files the base game already ships are recognised by
//! not being found in any mount and are left out.
//!
//! # Examples
//!
//! ```no_run
//! use source_bsp::BspReader;
//! use source_deps::{ExclusionRules, MountLocator, Resolver, seed_map};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut map = BspReader::open("maps/de_example.bsp")?;
//! let locator = MountLocator::new(["/games/cstrike", "/content/custom"]);
//!
//! let mut resolver = Resolver::new(locator, ExclusionRules::new());
//! seed_map(resolver.dependencies(), &mut map)?;
//! let resolution = resolver.finish()?;
//!
//! for file in &resolution.files {
//!     println!("{} ({} bytes)", file.path, file.size);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod exclusion;
pub mod locator;
pub mod mounts;
pub mod path;
pub mod resolver;
pub mod seed;
pub mod skins;

pub use error::{ResolveError, Result, Warning};
pub use exclusion::ExclusionRules;
pub use locator::{FileLocator, MapLocator, MountLocator};
pub use mounts::parse_mount_config;
pub use path::normalize_path;
pub use resolver::{
    DependencySet, DependencyState, Resolution, ResolvedFile, Resolver, SkipReason, SkippedPath,
};
pub use seed::{map_companion_files, parse_pack_list, seed_map};
pub use skins::SkinUsage;
