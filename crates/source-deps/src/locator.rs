//! Finding content files on disk
//!
//! The resolver asks a [`FileLocator`] where a relative content path lives.
//! [`MountLocator`] searches the game directory and its mounted content
//! directories; [`MapLocator`] answers from a fixed table.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Maps normalized relative content paths to files on disk
pub trait FileLocator {
    /// Location of `path`, or `None` if no mount provides it
    fn locate(&self, path: &str) -> Option<PathBuf>;
}

impl<T: FileLocator + ?Sized> FileLocator for &T {
    fn locate(&self, path: &str) -> Option<PathBuf> {
        (**self).locate(path)
    }
}

/// Searches mount directories in order; the first one holding the file wins
#[derive(Debug, Clone, Default)]
pub struct MountLocator {
    mounts: Vec<PathBuf>,
}

impl MountLocator {
    /// Create a locator over the given mounts, highest priority first
    pub fn new<I, P>(mounts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            mounts: mounts.into_iter().map(Into::into).collect(),
        }
    }
}

impl FileLocator for MountLocator {
    fn locate(&self, path: &str) -> Option<PathBuf> {
        // content never lives above a mount
        if path.split('/').any(|component| component == "..") {
            return None;
        }
        self.mounts.iter().find_map(|mount| {
            let candidate = mount.join(path);
            if candidate.is_file() {
                Some(candidate)
            } else {
                find_ignoring_case(mount, path)
            }
        })
    }
}

/// Walk `relative` below `root` matching each component without regard to case
///
/// Content paths are stored lower-case, but files on case-sensitive file
/// systems keep whatever case their author gave them.
fn find_ignoring_case(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut current = root.to_path_buf();
    for component in relative.split('/').filter(|c| !c.is_empty()) {
        let exact = current.join(component);
        if exact.exists() {
            current = exact;
            continue;
        }
        current = fs::read_dir(&current)
            .ok()?
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_name().to_string_lossy().eq_ignore_ascii_case(component))?
            .path();
    }
    current.is_file().then_some(current)
}

/// Answers from an explicit table of relative path to location
#[derive(Debug, Clone, Default)]
pub struct MapLocator {
    files: HashMap<String, PathBuf>,
}

impl MapLocator {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file
    pub fn insert<P: Into<PathBuf>>(&mut self, path: &str, location: P) {
        self.files.insert(path.to_string(), location.into());
    }
}

impl FileLocator for MapLocator {
    fn locate(&self, path: &str) -> Option<PathBuf> {
        self.files.get(path).cloned()
    }
}
