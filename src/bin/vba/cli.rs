//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use vba_blocks::TargetType;

/// vba-blocks - A package manager and build tool for VBA
#[derive(Parser)]
#[command(name = "vba")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a vba-blocks package in a directory
    Init(InitArgs),

    /// Validate vba-block.toml
    Check(CheckArgs),

    /// Display dependencies and references
    Tree(TreeArgs),

    /// Normalize source files to CRLF line endings
    Normalize(NormalizeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Package name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Package author (repeatable; defaults to `[init] authors` from config)
    #[arg(long = "author")]
    pub authors: Vec<String>,

    /// Build target type, e.g. xlsm or docm
    #[arg(long, value_parser = parse_target_type)]
    pub target: Option<TargetType>,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct ManifestArgs {
    /// Path to vba-block.toml (defaults to searching upward from cwd)
    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Print the validated manifest as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Hide references
    #[arg(long)]
    pub no_references: bool,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Report files that would change without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_target_type(s: &str) -> Result<TargetType, String> {
    s.parse::<TargetType>()
        .map_err(|_| format!("unknown target type `{}` (supported: {})", s, TargetType::supported()))
}
