//! Command implementations

pub mod list;
pub mod pack;

use anyhow::Result;
use console::style;
use source_deps::{Resolution, Warning};

use crate::cli::MapArgs;
use crate::project::MapProject;
use crate::utils::{
    add_table_row, create_spinner, create_table, format_bytes, format_file_count,
    format_kilobytes,
};

/// Open the map and resolve its custom content behind a spinner
pub(crate) fn resolve_map(args: &MapArgs) -> Result<(MapProject, Resolution)> {
    let project = MapProject::open(&args.map)?;
    for warning in &project.warnings {
        print_warning(warning);
    }

    let spinner = create_spinner(&format!("Finding dependencies of {}...", project.map_name));
    let resolution = project.resolve();
    spinner.finish_and_clear();
    Ok((project, resolution?))
}

pub(crate) fn print_warning(warning: &Warning) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), warning);
}

/// Files per type, then any file at or above the size threshold
pub(crate) fn print_summary(resolution: &Resolution, warn_filesize: u64) {
    println!("\n{}", style("Found custom content").bold().underlined());

    let mut table = create_table(&["Type", "Files"]);
    for (file_type, count) in resolution.counts_by_type() {
        add_table_row(&mut table, &[file_type, count.to_string()]);
    }
    table.printstd();
    println!(
        "Total: {} in {}",
        style(format_bytes(resolution.total_size())).cyan(),
        format_file_count(resolution.files.len())
    );

    let large = resolution.large_files(warn_filesize);
    if !large.is_empty() {
        println!("\n{}", style("Large files:").yellow().bold());
        for warning in &large {
            if let Warning::LargeFile { path, size } = warning {
                println!("    {} is {}", path, format_kilobytes(*size));
            }
        }
    }
}
