//! Dependency closure
//!
//! Seeds go into a [`DependencySet`]. [`Resolver::resolve`] then works
//! through the unresolved entries until none are left:
//!
//! 1. excluded paths are dropped
//! 2. paths no mount provides are dropped; they belong to the base game or
//!    are simply missing
//! 3. the rest are located, sized and, for materials and models, parsed for
//!    further dependencies
//!
//! Each path is queued at most once, so the loop ends on cyclic includes.

use log::{debug, trace};
use source_mdl::{MdlFile, MdlError, companion_files};
use source_vmt::{MaterialReference, parse_references};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ResolveError, Result, Warning};
use crate::exclusion::ExclusionRules;
use crate::locator::FileLocator;
use crate::path::{file_type, material_path, normalize_path, texture_path};
use crate::skins::SkinUsage;

/// State of a known dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyState {
    /// Waiting to be processed
    Unresolved,
    /// Found on disk
    Resolved {
        /// Absolute location
        location: PathBuf,
        /// Size in bytes
        size: u64,
    },
}

/// Why a requested path was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SkipReason {
    /// Matched a deny list rule
    Excluded,
    /// No mount provides it
    NotFound,
}

/// A requested path that will not be packed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkippedPath {
    /// Normalized relative path
    pub path: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Known dependencies and the skins requested for models
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    entries: BTreeMap<String, DependencyState>,
    queue: VecDeque<String>,
    seen: HashSet<String>,
    skins: SkinUsage,
}

impl DependencySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path; returns false if it was already requested
    pub fn insert(&mut self, path: &str) -> bool {
        let path = normalize_path(path);
        if path.is_empty() || !self.seen.insert(path.clone()) {
            return false;
        }
        trace!("Queued {}", path);
        self.entries.insert(path.clone(), DependencyState::Unresolved);
        self.queue.push_back(path);
        true
    }

    /// Add a model together with the skin it is shown with; `None` means every skin
    pub fn insert_model(&mut self, path: &str, skin: Option<u32>) -> bool {
        self.skins.record(&normalize_path(path), skin);
        self.insert(path)
    }

    /// Add every path from an iterator
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.insert(path.as_ref());
        }
    }

    /// Current state of a path
    pub fn state(&self, path: &str) -> Option<&DependencyState> {
        self.entries.get(path)
    }

    /// Whether the path is currently known
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of known dependencies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no dependency is known
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dependencies waiting to be processed
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Skins requested so far
    pub fn skins(&self) -> &SkinUsage {
        &self.skins
    }

    /// Known paths in order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn next_unresolved(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    fn resolve(&mut self, path: &str, location: PathBuf, size: u64) {
        self.entries
            .insert(path.to_string(), DependencyState::Resolved { location, size });
    }

    fn remove(&mut self, path: &str) {
        self.entries.remove(path);
    }
}

/// A file that will be packed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedFile {
    /// Normalized relative path
    pub path: String,
    /// Absolute location
    pub location: PathBuf,
    /// Size in bytes
    pub size: u64,
}

/// Outcome of a resolution
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Files to pack, in path order
    pub files: Vec<ResolvedFile>,
    /// Requested paths that will not be packed
    pub skipped: Vec<SkippedPath>,
    /// Skins each model was resolved with
    pub skins: SkinUsage,
}

impl Resolution {
    /// Relative paths of the files to pack
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.path.as_str())
    }

    /// Total size of the files to pack
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|file| file.size).sum()
    }

    /// Files whose size in KB (1000 bytes) is at least `threshold_kb`, largest first
    pub fn large_files(&self, threshold_kb: u64) -> Vec<Warning> {
        let mut large: Vec<&ResolvedFile> = self
            .files
            .iter()
            .filter(|file| file.size / 1000 >= threshold_kb)
            .collect();
        large.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        large
            .into_iter()
            .map(|file| Warning::LargeFile {
                path: file.path.clone(),
                size: file.size,
            })
            .collect()
    }

    /// Number of files of each type
    pub fn counts_by_type(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for file in &self.files {
            *counts.entry(file_type(&file.path).to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Add-list for `bspzip -addlist`: relative path, then absolute path, per file
    pub fn add_list(&self) -> String {
        let mut list = String::new();
        for file in &self.files {
            list.push_str(&file.path);
            list.push('\n');
            list.push_str(&file.location.to_string_lossy());
            list.push('\n');
        }
        list
    }
}

/// Computes the closure of a dependency set against the mounted content
pub struct Resolver<L> {
    locator: L,
    exclusions: ExclusionRules,
    dependencies: DependencySet,
    skipped: Vec<SkippedPath>,
}

impl<L: FileLocator> Resolver<L> {
    /// Create a resolver with an empty dependency set
    pub fn new(locator: L, exclusions: ExclusionRules) -> Self {
        Self {
            locator,
            exclusions,
            dependencies: DependencySet::new(),
            skipped: Vec::new(),
        }
    }

    /// The dependency set, for seeding
    pub fn dependencies(&mut self) -> &mut DependencySet {
        &mut self.dependencies
    }

    /// Process unresolved dependencies until there are none left
    pub fn resolve(&mut self) -> Result<()> {
        while let Some(path) = self.dependencies.next_unresolved() {
            self.process(&path)?;
        }
        Ok(())
    }

    /// Resolve everything and hand back the outcome
    pub fn finish(mut self) -> Result<Resolution> {
        self.resolve()?;

        let files = self
            .dependencies
            .entries
            .into_iter()
            .filter_map(|(path, state)| match state {
                DependencyState::Resolved { location, size } => Some(ResolvedFile {
                    path,
                    location,
                    size,
                }),
                DependencyState::Unresolved => None,
            })
            .collect();

        Ok(Resolution {
            files,
            skipped: self.skipped,
            skins: self.dependencies.skins,
        })
    }

    fn process(&mut self, path: &str) -> Result<()> {
        if self.exclusions.is_excluded(path) {
            debug!("Excluded {}", path);
            self.skip(path, SkipReason::Excluded);
            return Ok(());
        }

        let Some(location) = self.locator.locate(path) else {
            trace!("{} is not custom content", path);
            self.skip(path, SkipReason::NotFound);
            return Ok(());
        };

        let size = fs::metadata(&location)
            .map_err(|source| ResolveError::Io {
                path: location.clone(),
                source,
            })?
            .len();

        let discovered = match path.rsplit_once('.').map(|(_, extension)| extension) {
            Some("vmt") => material_dependencies(&location)?,
            Some("mdl") => model_dependencies(path, &location, &self.dependencies.skins)?,
            _ => Vec::new(),
        };

        debug!("Resolved {} -> {}", path, location.display());
        self.dependencies.resolve(path, location, size);
        self.dependencies.extend(discovered);
        Ok(())
    }

    fn skip(&mut self, path: &str, reason: SkipReason) {
        self.dependencies.remove(path);
        self.skipped.push(SkippedPath {
            path: path.to_string(),
            reason,
        });
    }
}

fn read_file(location: &Path) -> Result<Vec<u8>> {
    fs::read(location).map_err(|source| ResolveError::Io {
        path: location.to_path_buf(),
        source,
    })
}

/// Paths a material refers to
pub fn material_references(text: &str) -> std::result::Result<Vec<String>, source_vmt::VmtError> {
    Ok(parse_references(text)?
        .into_iter()
        .map(|reference| match reference {
            MaterialReference::Texture(value) => texture_path(&value),
            MaterialReference::Material(value) => material_path(&value),
            MaterialReference::Include(value) => normalize_path(&value),
        })
        .collect())
}

fn material_dependencies(location: &Path) -> Result<Vec<String>> {
    let data = read_file(location)?;
    material_references(&String::from_utf8_lossy(&data)).map_err(|source| ResolveError::Material {
        path: location.to_path_buf(),
        source,
    })
}

fn model_dependencies(path: &str, location: &Path, skins: &SkinUsage) -> Result<Vec<String>> {
    let data = read_file(location)?;
    let model_error = |source| ResolveError::Model {
        path: location.to_path_buf(),
        source,
    };

    let model = MdlFile::parse(&data).map_err(model_error)?;
    let selection = skins.get(path);
    let names = model.material_names(&selection).map_err(|error| match error {
        MdlError::InvalidSkin { skin, .. } => ResolveError::InvalidSkin {
            model: path.to_string(),
            skin,
        },
        other => model_error(other),
    })?;

    let mut discovered = companion_files(path);
    discovered.extend(names.iter().map(|name| material_path(name)));
    Ok(discovered)
}
