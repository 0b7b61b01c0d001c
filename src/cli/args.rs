// src/cli/args.rs

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Color output mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Interface conformance checks for script projects
#[derive(Parser, Debug)]
#[command(name = "interfaced")]
#[command(version)]
#[command(about = "Check that scripts implement the interfaces they declare", long_about = None)]
pub struct Cli {
    /// Color output: auto, always, never
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate every implementer under the configured roots
    #[command(visible_alias = "c")]
    Check {
        /// Project root directory (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Directories to scan instead of `validate_dirs` ("res://" paths allowed)
        #[arg(value_name = "ROOTS")]
        roots: Vec<String>,
    },
    /// Show declarations, members and conformance of scripts
    #[command(visible_alias = "i")]
    Inspect {
        /// Project root directory (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Paths to inspect (files, directories, or glob patterns)
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<String>,
    },
}
