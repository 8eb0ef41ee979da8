//! `vba normalize` command
//!
//! Assembles the build graph, applies the source transform, and writes
//! components back with CRLF line endings.

use anyhow::Result;

use crate::cli::NormalizeArgs;
use crate::commands::load_manifest;
use vba_blocks::ops::{assemble, write_components};
use vba_blocks::{to_src, GlobalContext};

pub fn execute(ctx: &GlobalContext, args: NormalizeArgs) -> Result<()> {
    let manifest = load_manifest(ctx, &args.manifest)?;
    let original = assemble(&manifest)?;
    let normalized = to_src(original.clone());

    if args.dry_run {
        for (before, after) in original.components.iter().zip(&normalized.components) {
            if before.code != after.code {
                println!("would normalize {}", before.name);
            }
        }
        return Ok(());
    }

    let changed = write_components(&manifest, &normalized)?;
    eprintln!(
        "  Normalized {} of {} components",
        changed,
        normalized.components.len()
    );

    Ok(())
}
