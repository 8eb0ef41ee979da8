//! Implementation of `vba init`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::core::manifest::{generate_manifest, MANIFEST_NAME};
use crate::core::target::TargetType;

/// Options for creating a new project.
#[derive(Debug, Clone)]
pub struct NewOptions {
    /// Package name
    pub name: String,

    /// Authors for the manifest
    pub authors: Vec<String>,

    /// Build target type
    pub target: Option<TargetType>,
}

/// Initialize a vba-blocks project at `path`, creating the directory if
/// needed. Fails if a manifest already exists there.
pub fn init_project(path: &Path, opts: &NewOptions) -> Result<()> {
    if opts.authors.is_empty() {
        bail!(
            "a package needs at least one author\n\
             \n\
             Pass `--author` or set `authors` under [init] in the vba-blocks config."
        );
    }

    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }

    let manifest_path = path.join(MANIFEST_NAME);
    if manifest_path.exists() {
        bail!("`{}` already exists in `{}`", MANIFEST_NAME, path.display());
    }

    let manifest = generate_manifest(&opts.name, &opts.authors, opts.target);
    fs::write(&manifest_path, manifest)
        .with_context(|| format!("failed to write {}", MANIFEST_NAME))?;

    fs::create_dir_all(path.join("src")).with_context(|| "failed to create src directory")?;

    let gitignore = r#"# vba-blocks build artifacts
/target/

# Office lock and backup files
~$*
*.backup
"#;
    let gitignore_path = path.join(".gitignore");
    if !gitignore_path.exists() {
        fs::write(&gitignore_path, gitignore)?;
    }

    tracing::info!("created package `{}` in {}", opts.name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Manifest;
    use tempfile::TempDir;

    fn opts(name: &str) -> NewOptions {
        NewOptions {
            name: name.to_string(),
            authors: vec!["Tim Hall".to_string()],
            target: Some(TargetType::Xlsm),
        }
    }

    #[test]
    fn test_init_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("budget");

        init_project(&project_dir, &opts("budget")).unwrap();

        assert!(project_dir.join(MANIFEST_NAME).exists());
        assert!(project_dir.join("src").is_dir());
        assert!(project_dir.join(".gitignore").exists());

        let manifest = Manifest::load(&project_dir).unwrap();
        assert_eq!(manifest.name(), "budget");
        assert_eq!(manifest.target.unwrap().target_type, TargetType::Xlsm);
    }

    #[test]
    fn test_init_existing_dir() {
        let tmp = TempDir::new().unwrap();
        init_project(tmp.path(), &opts("existing")).unwrap();
        assert!(tmp.path().join(MANIFEST_NAME).exists());

        let err = init_project(tmp.path(), &opts("existing")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_requires_author() {
        let tmp = TempDir::new().unwrap();
        let mut opts = opts("anon");
        opts.authors.clear();
        assert!(init_project(tmp.path(), &opts).is_err());
        assert!(!tmp.path().join(MANIFEST_NAME).exists());
    }
}
