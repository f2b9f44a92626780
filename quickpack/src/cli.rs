//! Root CLI structure for quickpack

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quickpack")]
#[command(about = "Pack the custom content a Source engine map depends on", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a map's custom content and pack it into the map with bspzip
    Pack(PackArgs),

    /// Resolve a map's custom content and list it
    List(ListArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by every command that resolves a map
#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// Path to the map, which must live in a `maps` directory of a game
    pub map: PathBuf,

    /// Report files of at least this many KB as large
    #[arg(long, value_name = "KB", default_value_t = 1000)]
    pub warn_filesize: u64,
}

#[derive(Args, Debug, Clone)]
pub struct PackArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Strip comments and editor-only keys from packed materials
    #[arg(long)]
    pub minify_vmt: bool,

    /// bspzip executable; looked up next to the game when omitted
    #[arg(long, env = "QUICKPACK_BSPZIP", value_name = "PATH")]
    pub bspzip: Option<PathBuf>,

    /// Keep the bspzip add-list at this path
    #[arg(long, value_name = "PATH")]
    pub add_list: Option<PathBuf>,

    /// Write the add-list but do not run bspzip
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Show size and source location of every file
    #[arg(short, long)]
    pub long: bool,

    /// Also list requested files that will not be packed
    #[arg(long)]
    pub skipped: bool,

    /// Print the result as JSON
    #[cfg(feature = "serde")]
    #[arg(long, conflicts_with = "long")]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pack_arguments() {
        let cli = Cli::try_parse_from([
            "quickpack",
            "-vv",
            "pack",
            "maps/de_test.bsp",
            "--minify-vmt",
            "--warn-filesize",
            "500",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Pack(args) = cli.command else {
            panic!("expected pack");
        };
        assert_eq!(args.map.map, PathBuf::from("maps/de_test.bsp"));
        assert_eq!(args.map.warn_filesize, 500);
        assert!(args.minify_vmt);
        assert!(args.dry_run);
    }

    #[test]
    fn test_default_threshold() {
        let cli = Cli::try_parse_from(["quickpack", "list", "maps/de_test.bsp"]).unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.map.warn_filesize, 1000);
        assert!(!args.long);
    }
}
