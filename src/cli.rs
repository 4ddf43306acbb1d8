//! CLI argument parsing with clap

use crate::config::KeyCoverage;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Photo Binner - sort photos and videos into date buckets
///
/// `sort` walks through the images in a folder and files each one into the
/// bucket bound to the number key you press. `bin` reads the capture date
/// embedded in every photo and video and files it under its year.
#[derive(Parser, Debug)]
#[command(name = "photo-binner")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML format)
    #[arg(short = 'C', long, global = true, env = "PHOTO_BINNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long, global = true)]
    pub json_log: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sort images one keypress at a time
    Sort(SortArgs),
    /// File photos and videos under the year they were captured
    Bin(BinArgs),
    /// Create or inspect the configuration file
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Project folder holding the unsorted images
    pub dir: PathBuf,

    /// Accept a mapping that binds only some of the digit keys
    #[arg(long)]
    pub partial_keys: bool,

    /// Create every bucket folder before sorting starts
    #[arg(long)]
    pub create_buckets: bool,
}

impl SortArgs {
    pub fn key_coverage(&self) -> KeyCoverage {
        if self.partial_keys {
            KeyCoverage::Partial
        } else {
            KeyCoverage::AllDigits
        }
    }
}

#[derive(Args, Debug)]
pub struct BinArgs {
    /// Folder holding the media files to bin
    pub dir: PathBuf,

    /// Show where files would go without moving anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write a sample configuration if none exists
    #[arg(long, conflicts_with = "show")]
    pub init: bool,

    /// Print the current key mappings
    #[arg(long)]
    pub show: bool,
}

impl Cli {
    /// Short name of the running mode, used for log file names
    pub fn mode_name(&self) -> &'static str {
        match self.command {
            Command::Sort(_) => "Sort",
            Command::Bin(_) => "Bin",
            Command::Config(_) => "Config",
        }
    }

    /// Whether the terminal UI will own the screen
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Command::Sort(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        let cli = Cli::parse_from(["photo-binner", "sort", "/photos", "--partial-keys"]);
        match &cli.command {
            Command::Sort(args) => {
                assert_eq!(args.dir, PathBuf::from("/photos"));
                assert_eq!(args.key_coverage(), KeyCoverage::Partial);
                assert!(!args.create_buckets);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.is_interactive());
        assert_eq!(cli.mode_name(), "Sort");
    }

    #[test]
    fn test_parse_bin_with_globals() {
        let cli = Cli::parse_from(["photo-binner", "bin", "/media", "-n", "-v", "-C", "my.toml"]);
        match &cli.command {
            Command::Bin(args) => {
                assert_eq!(args.dir, PathBuf::from("/media"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert!(!cli.is_interactive());
    }

    #[test]
    fn test_config_flags_conflict() {
        assert!(Cli::try_parse_from(["photo-binner", "config", "--init", "--show"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
