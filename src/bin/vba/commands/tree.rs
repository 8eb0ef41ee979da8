//! `vba tree` command

use anyhow::Result;

use crate::cli::TreeArgs;
use crate::commands::load_manifest;
use vba_blocks::core::DependencyKind;
use vba_blocks::util::fs::relative_path;
use vba_blocks::{GlobalContext, Manifest};

pub fn execute(ctx: &GlobalContext, args: TreeArgs) -> Result<()> {
    let manifest = load_manifest(ctx, &args.manifest)?;
    print!("{}", render(&manifest, !args.no_references));
    Ok(())
}

fn render(manifest: &Manifest, references: bool) -> String {
    let mut lines = Vec::new();

    for dep in &manifest.dependencies {
        let source = match &dep.kind {
            DependencyKind::Registry { version } => format!("{} (registry)", version),
            DependencyKind::Path { path } => {
                format!("(path: {})", relative_path(&manifest.dir, path).display())
            }
            DependencyKind::Git { url, reference } => format!("(git: {}, {})", url, reference),
        };
        let optional = if dep.optional { " [optional]" } else { "" };
        lines.push(format!("{} {}{}", dep.name, source, optional));
    }

    if references {
        for reference in &manifest.references {
            let optional = if reference.optional { " [optional]" } else { "" };
            lines.push(format!(
                "{} {} {} (reference){}",
                reference.name, reference.version, reference.guid, optional
            ));
        }
    }

    let mut out = format!("{} v{}\n", manifest.name(), manifest.version());
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        let branch = if i == last { "└── " } else { "├── " };
        out.push_str(branch);
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn manifest() -> Manifest {
        let dir = PathBuf::from(if cfg!(windows) { r"C:\book" } else { "/book" });
        Manifest::parse(
            r#"
[package]
name = "book"
version = "0.1.0"
authors = ["Tim Hall"]

[dependencies]
dictionary = "^1.4"
utc = { path = "../utc", optional = true }
web = { git = "https://github.com/VBA-tools/VBA-Web", tag = "v4.1.6" }

[references]
Scripting = { version = "1.0", guid = "{420B2830-E718-11CF-893D-00A0C9054228}" }
"#,
            &dir.join("vba-block.toml"),
        )
        .unwrap()
    }

    #[test]
    fn test_render_tree() {
        let out = render(&manifest(), true);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "book v0.1.0");
        assert!(lines[1].starts_with("├── dictionary ^1.4 (registry)"));
        assert!(lines[2].contains("utc (path: "));
        assert!(lines[2].ends_with("[optional]"));
        assert!(lines[3].contains("web (git: https://github.com/VBA-tools/VBA-Web, tag=v4.1.6)"));
        assert_eq!(
            lines[4],
            "└── Scripting 1.0 {420B2830-E718-11CF-893D-00A0C9054228} (reference)"
        );
    }

    #[test]
    fn test_render_without_references() {
        let out = render(&manifest(), false);
        assert!(!out.contains("Scripting"));
        assert!(out.lines().last().unwrap().starts_with("└── web"));
    }
}
