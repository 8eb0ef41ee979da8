//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `config.toml` in the user's config directory (or `~/.vba-blocks/`)
//! - Project: `.vba-blocks/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::target::TargetType;

/// vba-blocks configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for `vba init`
    pub init: InitConfig,
}

/// Defaults applied to newly created packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    /// Authors written into new manifests
    pub authors: Vec<String>,

    /// Target type written into new manifests
    pub target: Option<TargetType>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or can't be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Load global config, then apply project overrides.
    pub fn load_merged(global: Option<&Path>, project: &Path) -> Self {
        let mut config = global.map(Self::load_or_default).unwrap_or_default();
        config.merge(Self::load_or_default(project));
        config
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.init.authors.is_empty() {
            self.init.authors = other.init.authors;
        }
        if other.init.target.is_some() {
            self.init.target = other.init.target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[init]\nauthors = [\"Tim Hall\"]\ntarget = \"xlam\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.init.authors, vec!["Tim Hall"]);
        assert_eq!(config.init.target, Some(TargetType::Xlam));
    }

    #[test]
    fn test_load_or_default_on_bad_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[init]\ntarget = \"pdf\"\n").unwrap();

        assert_eq!(Config::load_or_default(&path), Config::default());
        assert_eq!(
            Config::load_or_default(&tmp.path().join("missing.toml")),
            Config::default()
        );
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");
        std::fs::write(&global, "[init]\nauthors = [\"Global\"]\ntarget = \"xlsm\"\n").unwrap();
        std::fs::write(&project, "[init]\ntarget = \"docm\"\n").unwrap();

        let config = Config::load_merged(Some(&global), &project);
        assert_eq!(config.init.authors, vec!["Global"]);
        assert_eq!(config.init.target, Some(TargetType::Docm));
    }
}
