//! Dependency specification.
//!
//! A raw `[dependencies]` entry is classified exactly once, here, into a
//! [`DependencyKind`]. Nothing downstream looks at the raw shape again.

use std::fmt;
use std::path::{Path, PathBuf};

use semver::VersionReq;
use serde::Serialize;
use toml::{Table, Value};
use url::Url;

use crate::core::errors::ValidationError;
use crate::core::raw;
use crate::util::paths::PathResolver;

/// Keys that choose where a dependency comes from. Exactly one must be present.
const LOCATORS: [&str; 3] = ["version", "path", "git"];

/// Keys that pick a git reference. At most one, and only alongside `git`.
const GIT_REFERENCES: [&str; 3] = ["branch", "tag", "rev"];

const KNOWN_KEYS: [&str; 9] = [
    "version",
    "path",
    "git",
    "branch",
    "tag",
    "rev",
    "optional",
    "features",
    "default-features",
];

/// Git reference specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "name")]
pub enum GitReference {
    /// Default branch (usually main/master)
    #[default]
    DefaultBranch,
    /// Specific branch
    Branch(String),
    /// Specific tag
    Tag(String),
    /// Specific revision (commit hash)
    Rev(String),
}

impl fmt::Display for GitReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitReference::DefaultBranch => write!(f, "default branch"),
            GitReference::Branch(b) => write!(f, "branch={}", b),
            GitReference::Tag(t) => write!(f, "tag={}", t),
            GitReference::Rev(r) => write!(f, "rev={}", r),
        }
    }
}

/// Where a dependency comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "source")]
pub enum DependencyKind {
    /// Published package matched by a version requirement
    Registry { version: VersionReq },
    /// Local, unpublished package (absolute path)
    Path { path: PathBuf },
    /// Git repository
    Git { url: Url, reference: GitReference },
}

/// A validated dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Package name
    pub name: String,

    #[serde(flatten)]
    pub kind: DependencyKind,

    /// Whether this is optional
    pub optional: bool,

    /// Features to enable, in declaration order without duplicates
    pub features: Vec<String>,

    /// Whether default features are enabled
    pub default_features: bool,
}

impl Dependency {
    /// Create a dependency with default settings.
    pub fn new(name: impl Into<String>, kind: DependencyKind) -> Self {
        Dependency {
            name: name.into(),
            kind,
            optional: false,
            features: Vec::new(),
            default_features: true,
        }
    }

    /// Check if this is a registry dependency.
    pub fn is_registry(&self) -> bool {
        matches!(self.kind, DependencyKind::Registry { .. })
    }

    /// Check if this is a path dependency.
    pub fn is_path(&self) -> bool {
        matches!(self.kind, DependencyKind::Path { .. })
    }

    /// Check if this is a git dependency.
    pub fn is_git(&self) -> bool {
        matches!(self.kind, DependencyKind::Git { .. })
    }

    /// Version requirement, for registry dependencies.
    pub fn version_req(&self) -> Option<&VersionReq> {
        match &self.kind {
            DependencyKind::Registry { version } => Some(version),
            _ => None,
        }
    }

    /// Classify one raw `[dependencies]` entry.
    pub(crate) fn parse(
        name: &str,
        value: &Value,
        dir: &Path,
        resolver: &dyn PathResolver,
    ) -> Result<Self, ValidationError> {
        let field = raw::field("dependencies", name);

        match value {
            Value::String(version) => {
                let version = parse_version_req(version, &field)?;
                Ok(Dependency::new(name, DependencyKind::Registry { version }))
            }
            Value::Table(table) => parse_detailed(name, table, &field, dir, resolver),
            other => Err(raw::invalid_type(
                field,
                "a version string or a table",
                other,
            )),
        }
    }
}

fn parse_detailed(
    name: &str,
    table: &Table,
    field: &str,
    dir: &Path,
    resolver: &dyn PathResolver,
) -> Result<Dependency, ValidationError> {
    raw::warn_unknown_keys(table, &KNOWN_KEYS, field);

    let locators: Vec<&'static str> = LOCATORS
        .into_iter()
        .filter(|key| table.contains_key(*key))
        .collect();
    let references: Vec<&'static str> = GIT_REFERENCES
        .into_iter()
        .filter(|key| table.contains_key(*key))
        .collect();

    match locators.len() {
        0 => {
            return Err(ValidationError::MissingLocator {
                name: name.to_string(),
            })
        }
        1 => {}
        _ => {
            return Err(ValidationError::AmbiguousDependency {
                name: name.to_string(),
                fields: locators,
            })
        }
    }

    if references.len() > 1 || (!references.is_empty() && locators[0] != "git") {
        let mut fields = locators;
        fields.extend(references);
        return Err(ValidationError::AmbiguousDependency {
            name: name.to_string(),
            fields,
        });
    }

    let kind = match locators[0] {
        "version" => DependencyKind::Registry {
            version: parse_version_req(
                raw::req_str(table, "version", field)?,
                &raw::field(field, "version"),
            )?,
        },
        "path" => DependencyKind::Path {
            path: resolver.resolve(dir, Path::new(raw::req_str(table, "path", field)?)),
        },
        _ => {
            let git_field = raw::field(field, "git");
            let git = raw::req_str(table, "git", field)?;
            let url = Url::parse(git).map_err(|e| ValidationError::InvalidValue {
                field: git_field,
                value: git.to_string(),
                reason: e.to_string(),
            })?;

            let reference = if let Some(branch) = raw::opt_str(table, "branch", field)? {
                GitReference::Branch(branch.to_string())
            } else if let Some(tag) = raw::opt_str(table, "tag", field)? {
                GitReference::Tag(tag.to_string())
            } else if let Some(rev) = raw::opt_str(table, "rev", field)? {
                GitReference::Rev(rev.to_string())
            } else {
                GitReference::DefaultBranch
            };

            DependencyKind::Git { url, reference }
        }
    };

    let mut dep = Dependency::new(name, kind);

    if let Some(optional) = raw::opt_bool(table, "optional", field)? {
        dep.optional = optional;
    }

    if let Some(features) = raw::opt_str_array(table, "features", field)? {
        for feature in features {
            if !dep.features.contains(&feature) {
                dep.features.push(feature);
            }
        }
    }

    if let Some(default_features) = raw::opt_bool(table, "default-features", field)? {
        dep.default_features = default_features;
    }

    Ok(dep)
}

fn parse_version_req(value: &str, field: &str) -> Result<VersionReq, ValidationError> {
    value.parse().map_err(|e: semver::Error| ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match &self.kind {
            DependencyKind::Registry { version } => write!(f, " {}", version)?,
            DependencyKind::Path { path } => write!(f, " (path: {})", path.display())?,
            DependencyKind::Git { url, reference } => write!(f, " (git: {}, {})", url, reference)?,
        }
        if self.optional {
            write!(f, " [optional]")?;
        }
        Ok(())
    }
}
