//! Build graph assembly from a manifest's source files.

use anyhow::{bail, Result};

use crate::build::{BuildGraph, Component, ComponentKind};
use crate::core::Manifest;
use crate::util::diagnostic::suggestions;
use crate::util::fs;

/// Read every `[src]` file of `manifest` into a build graph.
///
/// Optional entries whose file is missing are skipped with a warning; a
/// missing required file is an error.
pub fn assemble(manifest: &Manifest) -> Result<BuildGraph> {
    let mut graph = BuildGraph::new(manifest.name());

    for entry in &manifest.src {
        if !entry.path.is_file() {
            if entry.optional {
                tracing::warn!(
                    "skipping optional source `{}`: {} not found",
                    entry.name,
                    entry.path.display()
                );
                continue;
            }
            bail!(
                "source `{}` not found at {}\n\nhelp: {}",
                entry.name,
                entry.path.display(),
                suggestions::MISSING_SOURCE
            );
        }

        let code = fs::read_to_string(&entry.path)?;
        let kind = entry
            .extension()
            .map(|ext| ComponentKind::from_extension(&ext))
            .unwrap_or(ComponentKind::Document);

        tracing::debug!("assembled {} `{}`", kind, entry.name);
        graph.add_component(Component::new(kind, &entry.name, code));
    }

    graph.references = manifest.references.iter().map(|r| r.name.clone()).collect();

    Ok(graph)
}

/// Write each component's code back to the file its `[src]` entry names.
///
/// Returns the number of files whose content changed.
pub fn write_components(manifest: &Manifest, graph: &BuildGraph) -> Result<usize> {
    let mut changed = 0;

    for component in &graph.components {
        let Some(entry) = manifest.source(&component.name) else {
            bail!(
                "component `{}` has no matching [src] entry in {}",
                component.name,
                manifest.manifest_path().display()
            );
        };

        let current = fs::read_to_string(&entry.path).ok();
        if current.as_deref() == Some(component.code.as_str()) {
            continue;
        }

        fs::write_string(&entry.path, &component.code)?;
        tracing::debug!("wrote {}", entry.path.display());
        changed += 1;
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::to_src;
    use crate::core::MANIFEST_NAME;
    use tempfile::TempDir;

    fn project(src: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(MANIFEST_NAME),
            format!(
                r#"
[package]
name = "book"
version = "0.1.0"
authors = ["Tim Hall"]

[src]
{}

[references]
Scripting = {{ version = "1.0", guid = "{{420B2830-E718-11CF-893D-00A0C9054228}}" }}
"#,
                src
            ),
        )
        .unwrap();
        std::fs::create_dir_all(tmp.path().join("src")).unwrap();
        tmp
    }

    #[test]
    fn test_assemble_reads_sources() {
        let tmp = project(
            "A = \"src/a.bas\"\nB = \"src/b.cls\"\nC = { path = \"src/c.frm\", optional = true }",
        );
        std::fs::write(tmp.path().join("src/a.bas"), "Attribute VB_Name = \"A\"\n").unwrap();
        std::fs::write(tmp.path().join("src/b.cls"), "VERSION 1.0 CLASS\n").unwrap();

        let manifest = Manifest::load(tmp.path()).unwrap();
        let graph = assemble(&manifest).unwrap();

        assert_eq!(graph.name, "book");
        assert_eq!(graph.components.len(), 2);
        assert_eq!(graph.components[0].kind, ComponentKind::Module);
        assert_eq!(graph.components[1].kind, ComponentKind::Class);
        assert!(graph.references.contains("Scripting"));
    }

    #[test]
    fn test_assemble_missing_required_source() {
        let tmp = project("A = \"src/a.bas\"");
        let manifest = Manifest::load(tmp.path()).unwrap();

        let err = assemble(&manifest).unwrap_err();
        assert!(err.to_string().contains("source `A` not found"));
    }

    #[test]
    fn test_assemble_names_non_utf8_source() {
        let tmp = project("A = \"src/a.bas\"");
        let exported: &[u8] = b"Attribute VB_Name = \"A\"\n' \x93quoted\x94\n";
        std::fs::write(tmp.path().join("src/a.bas"), exported).unwrap();
        let manifest = Manifest::load(tmp.path()).unwrap();

        let err = assemble(&manifest).unwrap_err().to_string();
        assert!(err.contains("a.bas is not valid UTF-8"));
    }

    #[test]
    fn test_write_components_round_trip() {
        let tmp = project("A = \"src/a.bas\"\nB = \"src/b.bas\"");
        std::fs::write(tmp.path().join("src/a.bas"), "a\nb\n").unwrap();
        std::fs::write(tmp.path().join("src/b.bas"), "already\r\n").unwrap();

        let manifest = Manifest::load(tmp.path()).unwrap();
        let graph = to_src(assemble(&manifest).unwrap());
        let changed = write_components(&manifest, &graph).unwrap();

        assert_eq!(changed, 1);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("src/a.bas")).unwrap(),
            "a\r\nb\r\n"
        );
        assert_eq!(write_components(&manifest, &graph).unwrap(), 0);
    }
}
