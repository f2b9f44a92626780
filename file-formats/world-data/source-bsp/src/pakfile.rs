//! Embedded pak file (lump 40)
//!
//! The map compiler stores generated content, such as cubemap-patched
//! materials under `materials/maps/<mapname>/`, in an uncompressed zip archive
//! inside the map itself.

use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::Result;

/// Zip archive embedded in a map
#[derive(Debug)]
pub struct PakFile {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl PakFile {
    /// Open the pak file from the raw contents of lump 40
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Number of entries in the archive
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Whether the archive holds no entries
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Names of all file entries, with `/` separators
    pub fn file_names(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(|name| name.replace('\\', "/"))
            .collect()
    }

    /// Read every file entry whose lower-cased name starts with `prefix`
    pub fn read_prefixed(&mut self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let mut files = Vec::new();
        for index in 0..self.archive.len() {
            let mut entry = self.archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().replace('\\', "/").to_lowercase();
            if !name.starts_with(prefix) {
                continue;
            }
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents)?;
            files.push((name, contents));
        }
        Ok(files)
    }
}
