//! `vba check` command
//!
//! Loads and validates vba-block.toml, printing a summary or the validated
//! manifest as JSON.

use anyhow::Result;

use crate::cli::CheckArgs;
use crate::commands::load_manifest;
use vba_blocks::util::fs::relative_path;
use vba_blocks::{GlobalContext, Manifest};

pub fn execute(ctx: &GlobalContext, args: CheckArgs) -> Result<()> {
    let manifest = load_manifest(ctx, &args.manifest)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    print!("{}", summary(ctx, &manifest));
    Ok(())
}

fn summary(ctx: &GlobalContext, manifest: &Manifest) -> String {
    let mut out = format!(
        "     Checked {} v{} ({})\n",
        manifest.name(),
        manifest.version(),
        relative_path(ctx.cwd(), &manifest.manifest_path()).display()
    );

    if let Some(target) = &manifest.target {
        out.push_str(&format!(
            "      target {:?} {}\n",
            target.target_type.application(),
            relative_path(ctx.cwd(), &target.output_path()).display()
        ));
    }

    out.push_str(&format!(
        "     sources {}\n\
         \x20       deps {}\n\
         \x20 references {}\n",
        manifest.src.len(),
        manifest.dependencies.len(),
        manifest.references.len()
    ));
    out
}
