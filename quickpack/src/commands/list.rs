//! `list`: show what a map would pack

use anyhow::Result;
use console::style;

use crate::cli::ListArgs;
use crate::utils::{add_table_row, create_table, format_bytes};

use super::{print_summary, resolve_map};

pub fn execute(args: ListArgs) -> Result<()> {
    let (_project, resolution) = resolve_map(&args.map)?;

    #[cfg(feature = "serde")]
    if args.json {
        return print_json(&args, &_project, &resolution);
    }

    if resolution.files.is_empty() {
        println!("No custom content found");
    } else if args.long {
        let mut table = create_table(&["File", "Size", "Source"]);
        for file in &resolution.files {
            add_table_row(
                &mut table,
                &[
                    file.path.clone(),
                    format_bytes(file.size),
                    file.location.display().to_string(),
                ],
            );
        }
        table.printstd();
    } else {
        for path in resolution.paths() {
            println!("{}", path);
        }
    }

    if args.skipped && !resolution.skipped.is_empty() {
        println!("\n{}", style("Not packed").bold());
        for skipped in &resolution.skipped {
            println!("    {} ({:?})", skipped.path, skipped.reason);
        }
    }

    if args.long {
        print_summary(&resolution, args.map.warn_filesize);
    }
    Ok(())
}

#[cfg(feature = "serde")]
fn print_json(
    args: &ListArgs,
    project: &crate::project::MapProject,
    resolution: &source_deps::Resolution,
) -> Result<()> {
    use serde::Serialize;
    use source_deps::{ResolvedFile, SkippedPath, Warning};

    #[derive(Serialize)]
    struct Report<'a> {
        map: &'a str,
        files: &'a [ResolvedFile],
        #[serde(skip_serializing_if = "Option::is_none")]
        skipped: Option<&'a [SkippedPath]>,
        large_files: Vec<String>,
        warnings: Vec<String>,
    }

    let large_files = resolution
        .large_files(args.map.warn_filesize)
        .into_iter()
        .filter_map(|warning| match warning {
            Warning::LargeFile { path, .. } => Some(path),
            Warning::Config(_) => None,
        })
        .collect();

    let report = Report {
        map: &project.map_name,
        files: &resolution.files,
        skipped: args.skipped.then_some(resolution.skipped.as_slice()),
        large_files,
        warnings: project.warnings.iter().map(ToString::to_string).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
