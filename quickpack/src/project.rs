//! The map being packed and the game directory around it
//!
//! A map must sit in the `maps` directory of a game. The game directory is
//! the first mount; `cfg/mount.cfg` adds more. Next to the map, an optional
//! `<map>.pack.txt` lists extra files to pack and `<map>.nopack.txt` lists
//! patterns of files never to pack.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use source_bsp::BspReader;
use source_deps::{
    ExclusionRules, MountLocator, Resolution, Resolver, Warning, map_companion_files,
    parse_mount_config, parse_pack_list, seed_map,
};
use std::fs;
use std::path::{Path, PathBuf};

/// A map inside a game directory
#[derive(Debug, Clone)]
pub struct MapProject {
    /// Absolute path of the map file
    pub map_path: PathBuf,
    /// Game directory holding the `maps` directory
    pub game_root: PathBuf,
    /// Lower-case map name without extension
    pub map_name: String,
    /// Search roots, highest priority first
    pub mounts: Vec<PathBuf>,
    /// Problems found in configuration files
    pub warnings: Vec<Warning>,
}

impl MapProject {
    /// Validate the map location and read the mount configuration
    pub fn open(map: &Path) -> Result<Self> {
        if !map.is_file() {
            bail!("File does not exist: {}", map.display());
        }
        let map_path = fs::canonicalize(map)
            .with_context(|| format!("Failed to resolve {}", map.display()))?;

        let is_bsp = map_path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("bsp"));
        if !is_bsp {
            bail!("Not a BSP file: {}", map_path.display());
        }

        let maps_dir = map_path.parent();
        let in_maps = maps_dir
            .and_then(Path::file_name)
            .is_some_and(|name| name.eq_ignore_ascii_case("maps"));
        let Some(game_root) = maps_dir.and_then(Path::parent).filter(|_| in_maps) else {
            bail!("Not in a valid game directory: {}", map_path.display());
        };
        let game_root = game_root.to_path_buf();

        let map_name = map_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let mut project = Self {
            map_path,
            mounts: vec![game_root.clone()],
            game_root,
            map_name,
            warnings: Vec::new(),
        };
        project.read_mount_config()?;
        Ok(project)
    }

    fn read_mount_config(&mut self) -> Result<()> {
        let mount_file = self.game_root.join("cfg").join("mount.cfg");
        if !mount_file.is_file() {
            return Ok(());
        }

        let text = fs::read_to_string(&mount_file)
            .with_context(|| format!("Failed to read {}", mount_file.display()))?;
        match parse_mount_config(&text) {
            Ok(mounts) => {
                info!("Looking in mounts: {:?}", mounts);
                self.mounts.extend(mounts);
            }
            Err(warning) => {
                warn!("{}", warning);
                self.warnings.push(warning);
            }
        }
        Ok(())
    }

    /// `<map>.pack.txt` next to the map
    pub fn allow_list_path(&self) -> PathBuf {
        self.map_path.with_extension("pack.txt")
    }

    /// `<map>.nopack.txt` next to the map
    pub fn deny_list_path(&self) -> PathBuf {
        self.map_path.with_extension("nopack.txt")
    }

    /// Exclusion rules from the deny list, if there is one
    pub fn exclusions(&self) -> Result<ExclusionRules> {
        let path = self.deny_list_path();
        if !path.is_file() {
            return Ok(ExclusionRules::new());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let rules = ExclusionRules::parse(&text)
            .with_context(|| format!("Invalid deny list {}", path.display()))?;
        info!("Removing files from {}: {} rules", path.display(), rules.len());
        Ok(rules)
    }

    /// Paths from the allow list, if there is one
    pub fn allow_list(&self) -> Result<Vec<String>> {
        let path = self.allow_list_path();
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let paths = parse_pack_list(&text);
        info!("Adding files from {}: {} entries", path.display(), paths.len());
        Ok(paths)
    }

    /// Compute the custom content of the map
    pub fn resolve(&self) -> Result<Resolution> {
        let locator = MountLocator::new(self.mounts.iter().cloned());
        let mut resolver = Resolver::new(locator, self.exclusions()?);

        resolver
            .dependencies()
            .extend(map_companion_files(&self.map_name));
        resolver.dependencies().extend(self.allow_list()?);

        {
            let mut map = BspReader::open(&self.map_path)
                .with_context(|| format!("Failed to open map {}", self.map_path.display()))?;
            seed_map(resolver.dependencies(), &mut map)
                .with_context(|| format!("Failed to read map {}", self.map_path.display()))?;
        }

        resolver.finish().context("Packing failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn game_with_map(name: &str) -> (TempDir, PathBuf) {
        let game = TempDir::new().unwrap();
        fs::create_dir_all(game.path().join("maps")).unwrap();
        let map = game.path().join("maps").join(name);
        fs::write(&map, b"VBSP").unwrap();
        (game, map)
    }

    #[test]
    fn test_open_derives_game_root() {
        let (game, map) = game_with_map("DE_Test.bsp");
        let project = MapProject::open(&map).unwrap();
        assert_eq!(project.game_root, fs::canonicalize(game.path()).unwrap());
        assert_eq!(project.map_name, "de_test");
        assert_eq!(project.mounts, vec![project.game_root.clone()]);
        assert!(project.allow_list_path().ends_with("maps/DE_Test.pack.txt"));
        assert!(project.deny_list_path().ends_with("maps/DE_Test.nopack.txt"));
    }

    #[test]
    fn test_open_rejects_bad_locations() {
        let game = TempDir::new().unwrap();
        let outside = game.path().join("de_test.bsp");
        fs::write(&outside, b"VBSP").unwrap();
        let error = MapProject::open(&outside).unwrap_err();
        assert!(error.to_string().contains("Not in a valid game directory"));

        let (_game, map) = game_with_map("de_test.vmf");
        let error = MapProject::open(&map).unwrap_err();
        assert!(error.to_string().contains("Not a BSP file"));

        let error = MapProject::open(Path::new("/nonexistent/maps/x.bsp")).unwrap_err();
        assert!(error.to_string().contains("File does not exist"));
    }

    #[test]
    fn test_mount_config() {
        let (game, map) = game_with_map("de_test.bsp");
        fs::create_dir_all(game.path().join("cfg")).unwrap();
        fs::write(
            game.path().join("cfg/mount.cfg"),
            "\"mountcfg\"\n{\n\t\"custom\" \"/content/custom\"\n}\n",
        )
        .unwrap();
        let project = MapProject::open(&map).unwrap();
        assert_eq!(project.mounts.len(), 2);
        assert_eq!(project.mounts[1], PathBuf::from("/content/custom"));
        assert!(project.warnings.is_empty());
    }

    #[test]
    fn test_malformed_mount_config_is_a_warning() {
        let (game, map) = game_with_map("de_test.bsp");
        fs::create_dir_all(game.path().join("cfg")).unwrap();
        fs::write(game.path().join("cfg/mount.cfg"), "mounts { }").unwrap();
        let project = MapProject::open(&map).unwrap();
        assert_eq!(project.mounts.len(), 1);
        assert_eq!(project.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_deny_list_is_an_error() {
        let (_game, map) = game_with_map("de_test.bsp");
        fs::write(map.with_extension("nopack.txt"), "materials/(\n").unwrap();
        let project = MapProject::open(&map).unwrap();
        assert!(project.exclusions().is_err());
    }
}
