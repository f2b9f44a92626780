//! Parsing `cfg/mount.cfg`
//!
//! ```text
//! "mountcfg"
//! {
//!     "cstrike"   "C:\Steam\steamapps\common\Counter-Strike Source\cstrike"
//!     "custom"    "D:\content\custom"
//! }
//! ```
//!
//! Only the values are used; they become mounts in file order. A file that
//! does not have this shape is ignored with a warning.

use source_vmt::tokenize;
use std::path::PathBuf;

use crate::error::Warning;

/// Extract the mount directories from `mount.cfg` text
pub fn parse_mount_config(text: &str) -> std::result::Result<Vec<PathBuf>, Warning> {
    let tokens = tokenize(text)
        .map_err(|e| Warning::Config(format!("Ignoring malformed mount.cfg: {}", e)))?;

    let malformed = || Warning::Config("Ignoring malformed mount.cfg".to_string());
    let [first, open, pairs @ .., close] = tokens.as_slice() else {
        return Err(malformed());
    };
    if !first.eq_ignore_ascii_case("mountcfg") || open != "{" || close != "}" {
        return Err(malformed());
    }
    if pairs.len() % 2 != 0 {
        return Err(malformed());
    }

    Ok(pairs
        .chunks_exact(2)
        .map(|pair| PathBuf::from(&pair[1]))
        .collect())
}
