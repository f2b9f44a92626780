//! `pack`: write the bspzip add-list and run bspzip

use anyhow::{Context, Result, bail};
use console::style;
use log::{debug, info};
use source_deps::Resolution;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::cli::PackArgs;
use crate::utils::create_spinner;

use super::{print_summary, resolve_map};

/// Directory below the game root that receives minified materials
pub const MINIFIED_DIR: &str = "quickpackmaterials";

/// Where bspzip is usually installed relative to the game directory
const BSPZIP_CANDIDATES: [&str; 4] = [
    "../bin/bspzip.exe",
    "../bin/bspzip",
    "../bin/linux64/bspzip",
    "../bin/win64/bspzip.exe",
];

pub fn execute(args: PackArgs) -> Result<()> {
    let (project, mut resolution) = resolve_map(&args.map)?;
    print_summary(&resolution, args.map.warn_filesize);

    let bspzip = if args.dry_run {
        None
    } else {
        Some(find_bspzip(args.bspzip.as_deref(), &project.game_root)?)
    };

    let minified_dir = project.game_root.join(MINIFIED_DIR);
    if args.minify_vmt {
        if minified_dir.exists() {
            fs::remove_dir_all(&minified_dir)
                .with_context(|| format!("Failed to clear {}", minified_dir.display()))?;
        }
        let count = minify_materials(&mut resolution, &minified_dir)?;
        info!("Minified {} materials into {}", count, minified_dir.display());
    }

    let add_list = resolution.add_list();
    let result = match (&bspzip, &args.add_list) {
        (Some(bspzip), None) => {
            let mut list = tempfile::Builder::new()
                .prefix("quickpack")
                .suffix(".txt")
                .tempfile_in(&project.game_root)
                .context("Failed to create add-list")?;
            list.write_all(add_list.as_bytes())
                .context("Failed to write add-list")?;
            run_bspzip(bspzip, &project.map_path, list.path())
        }
        (bspzip, Some(path)) => {
            fs::write(path, &add_list)
                .with_context(|| format!("Failed to write add-list {}", path.display()))?;
            println!("Wrote add-list to {}", style(path.display()).cyan());
            match bspzip {
                Some(bspzip) => run_bspzip(bspzip, &project.map_path, path),
                None => Ok(()),
            }
        }
        (None, None) => {
            print!("{}", add_list);
            Ok(())
        }
    };

    if args.minify_vmt && !args.dry_run && minified_dir.exists() {
        fs::remove_dir_all(&minified_dir)
            .with_context(|| format!("Failed to remove {}", minified_dir.display()))?;
    }
    result?;

    if !args.dry_run {
        println!("{}", style("Done!").green().bold());
    }
    Ok(())
}

/// Explicit path first, then the usual install locations
fn find_bspzip(explicit: Option<&Path>, game_root: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("bspzip not found at {}", path.display());
        }
        return Ok(path.to_path_buf());
    }

    BSPZIP_CANDIDATES
        .iter()
        .map(|candidate| game_root.join(candidate))
        .find(|candidate| candidate.is_file())
        .with_context(|| {
            format!(
                "bspzip not found for the game in {}; pass --bspzip or --dry-run",
                game_root.display()
            )
        })
}

fn run_bspzip(bspzip: &Path, map: &Path, add_list: &Path) -> Result<()> {
    println!("Writing to {}...", style(map.display()).cyan());
    let spinner = create_spinner("Running bspzip...");
    let output = Command::new(bspzip)
        .arg("-addlist")
        .arg(map)
        .arg(add_list)
        .arg(map)
        .output()
        .with_context(|| format!("Failed to run {}", bspzip.display()));
    spinner.finish_and_clear();

    let output = output?;
    debug!("bspzip: {}", String::from_utf8_lossy(&output.stdout));
    if !output.status.success() {
        bail!(
            "bspzip failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

/// Write minified copies of every material below `dir` and point the add-list at them
pub fn minify_materials(resolution: &mut Resolution, dir: &Path) -> Result<usize> {
    let mut count = 0;
    for file in resolution
        .files
        .iter_mut()
        .filter(|file| file.path.ends_with(".vmt"))
    {
        let data = fs::read(&file.location)
            .with_context(|| format!("Failed to read {}", file.location.display()))?;
        let minified = source_vmt::minify(&String::from_utf8_lossy(&data));

        let target = dir.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&target, &minified)
            .with_context(|| format!("Failed to write {}", target.display()))?;

        debug!("Minified {} ({} -> {} bytes)", file.path, file.size, minified.len());
        file.location = target;
        file.size = minified.len() as u64;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use source_deps::ResolvedFile;
    use tempfile::TempDir;

    #[test]
    fn test_minify_materials_rewrites_locations() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let vmt = content.path().join("sign.vmt");
        fs::write(
            &vmt,
            "\"LightmappedGeneric\"\n{\n\t\"%keywords\" \"sign\"\n\t\"$basetexture\" \"custom/sign\" // lit\n}\n",
        )
        .unwrap();
        let vtf = content.path().join("sign.vtf");
        fs::write(&vtf, b"VTF").unwrap();

        let mut resolution = Resolution {
            files: vec![
                ResolvedFile {
                    path: "materials/custom/sign.vmt".to_string(),
                    location: vmt.clone(),
                    size: 90,
                },
                ResolvedFile {
                    path: "materials/custom/sign.vtf".to_string(),
                    location: vtf.clone(),
                    size: 3,
                },
            ],
            ..Default::default()
        };

        assert_eq!(minify_materials(&mut resolution, out.path()).unwrap(), 1);
        let minified = out.path().join("materials/custom/sign.vmt");
        assert_eq!(resolution.files[0].location, minified);
        assert_eq!(resolution.files[1].location, vtf);

        let text = fs::read_to_string(&minified).unwrap();
        assert!(!text.contains("%keywords"));
        assert!(!text.contains("//"));
        assert!(text.contains("$basetexture"));
    }

    #[test]
    fn test_find_bspzip() {
        let root = TempDir::new().unwrap();
        let game = root.path().join("cstrike");
        fs::create_dir_all(root.path().join("bin")).unwrap();
        fs::create_dir_all(&game).unwrap();
        assert!(find_bspzip(None, &game).is_err());

        fs::write(root.path().join("bin/bspzip"), b"").unwrap();
        let found = find_bspzip(None, &game).unwrap();
        assert!(found.ends_with("bin/bspzip"));

        assert!(find_bspzip(Some(Path::new("/nonexistent/bspzip")), &game).is_err());
    }
}
