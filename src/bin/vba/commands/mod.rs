//! Command implementations

pub mod check;
pub mod completions;
pub mod init;
pub mod normalize;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::ManifestArgs;
use vba_blocks::{GlobalContext, Manifest, ManifestError};

/// Locate and load the manifest named by `--manifest-path`, or search upward
/// from the working directory.
pub fn load_manifest(ctx: &GlobalContext, args: &ManifestArgs) -> Result<Manifest> {
    let path: PathBuf = match &args.manifest_path {
        Some(path) => ctx.cwd().join(path),
        None => ctx.find_manifest().map_err(ManifestError::from)?,
    };

    Ok(Manifest::load(&path)?)
}
