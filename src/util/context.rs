//! Global context for vba-blocks operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};

use crate::core::errors::DocumentError;
use crate::core::manifest::MANIFEST_NAME;
use crate::util::config::Config;

/// Project directories for vba-blocks
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "vba-blocks", "vba-blocks"));

/// Name of the per-project settings directory.
pub const PROJECT_DIR_NAME: &str = ".vba-blocks";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global settings
    home: PathBuf,

    /// Whether to use colors in output
    color: bool,

    /// Merged global + project configuration
    config: Config,
}

impl GlobalContext {
    /// Create a new GlobalContext from the process environment.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = if let Some(dirs) = PROJECT_DIRS.as_ref() {
            dirs.config_dir().to_path_buf()
        } else {
            BaseDirs::new()
                .map(|b| b.home_dir().join(PROJECT_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(PROJECT_DIR_NAME))
        };

        let mut ctx = GlobalContext {
            cwd,
            home,
            color: true,
            config: Config::default(),
        };
        ctx.reload_config();
        ctx
    }

    /// Re-read the global and project configuration files.
    pub fn reload_config(&mut self) {
        let global = self.config_path();
        self.config = Config::load_merged(Some(&global), &self.project_config_path());
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.cwd.join(PROJECT_DIR_NAME).join("config.toml")
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find vba-block.toml starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, DocumentError> {
        find_manifest(&self.cwd)
    }
}

/// Find vba-block.toml in `start` or any of its parents.
pub fn find_manifest(start: &Path) -> Result<PathBuf, DocumentError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(DocumentError::NotFound {
                path: start.join(MANIFEST_NAME),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_manifest_in_parent() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&manifest, "[package]\nname = \"book\"\n").unwrap();
        let nested = tmp.path().join("src").join("forms");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested);
        assert_eq!(ctx.find_manifest().ok(), Some(manifest));
    }

    #[test]
    fn test_find_manifest_missing() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert!(matches!(
            ctx.find_manifest(),
            Err(DocumentError::NotFound { .. })
        ));
    }

    #[test]
    fn test_project_config_is_read() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(PROJECT_DIR_NAME);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[init]\nauthors = [\"Project Author\"]\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert_eq!(ctx.config().init.authors, vec!["Project Author"]);
        assert!(ctx.config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_color_toggle() {
        let tmp = TempDir::new().unwrap();
        let mut ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert!(ctx.color());
        ctx.set_color(false);
        assert!(!ctx.color());
    }
}
