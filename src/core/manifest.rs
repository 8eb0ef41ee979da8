//! vba-block.toml manifest parsing and schema.
//!
//! The manifest is the central configuration file for a package. Parsing is
//! split in two: reading the TOML document (which can fail with a
//! [`DocumentError`]) and validating the untyped table into a [`Manifest`]
//! (which can fail with a [`ValidationError`]). Validation is lexical and never
//! touches the filesystem.

use std::io;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::Serialize;
use toml::Table;

use crate::core::dependency::Dependency;
use crate::core::errors::{DocumentError, ManifestError, ValidationError};
use crate::core::raw;
use crate::core::reference::Reference;
use crate::core::source::SourceEntry;
use crate::core::target::{Target, TargetType};
use crate::util::paths::{LexicalResolver, PathResolver};

/// Conventional manifest filename inside a package directory.
pub const MANIFEST_NAME: &str = "vba-block.toml";

const TOP_LEVEL_KEYS: [&str; 4] = ["package", "src", "dependencies", "references"];

const PACKAGE_KEYS: [&str; 9] = [
    "name",
    "version",
    "authors",
    "target",
    "description",
    "license",
    "repository",
    "homepage",
    "keywords",
];

/// The validated manifest. Every path in it is absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// The directory containing this manifest
    pub dir: PathBuf,

    /// Package metadata from [package]
    pub package: PackageMetadata,

    /// Build target from `package.target`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,

    /// Source components, in declaration order
    pub src: Vec<SourceEntry>,

    /// Dependencies, in declaration order
    pub dependencies: Vec<Dependency>,

    /// Type-library references, in declaration order
    pub references: Vec<Reference>,
}

/// Package metadata from [package] section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    /// Package name
    pub name: String,

    /// Package version
    pub version: Version,

    /// Authors (at least one)
    pub authors: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// Validate a raw manifest document anchored at `dir`.
pub fn parse_manifest(raw: &Table, dir: &Path) -> Result<Manifest, ManifestError> {
    parse_manifest_with(raw, dir, &LexicalResolver)
}

/// Validate a raw manifest document, resolving paths with `resolver`.
pub fn parse_manifest_with(
    raw: &Table,
    dir: &Path,
    resolver: &dyn PathResolver,
) -> Result<Manifest, ManifestError> {
    let dir = resolver
        .absolute_dir(dir)
        .map_err(|source| DocumentError::Location {
            path: dir.to_path_buf(),
            source,
        })?;
    Ok(validate(raw, &dir, resolver)?)
}

/// Read and validate the manifest at `path`.
///
/// `path` may be the manifest file itself or a package directory containing
/// `vba-block.toml`.
pub async fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    let path = path.as_ref();
    let is_dir = tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    let file = if is_dir {
        path.join(MANIFEST_NAME)
    } else {
        path.to_path_buf()
    };

    let content = tokio::fs::read_to_string(&file)
        .await
        .map_err(|e| read_error(&file, e))?;

    Manifest::parse(&content, &file)
}

impl Manifest {
    /// Read and validate the manifest at `path` (file or package directory).
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let file = if path.is_dir() {
            path.join(MANIFEST_NAME)
        } else {
            path.to_path_buf()
        };

        let content = std::fs::read_to_string(&file).map_err(|e| read_error(&file, e))?;

        Self::parse(&content, &file)
    }

    /// Parse manifest content read from `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let raw = parse_document(content, path)?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        tracing::debug!("parsing manifest {}", path.display());
        parse_manifest(&raw, dir)
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.package.name
    }

    /// Get the package version.
    pub fn version(&self) -> &Version {
        &self.package.version
    }

    /// Path of the manifest file this was loaded from.
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_NAME)
    }

    /// Get a source entry by component name.
    pub fn source(&self, name: &str) -> Option<&SourceEntry> {
        self.src.iter().find(|s| s.name == name)
    }

    /// Get a dependency by package name.
    pub fn dependency(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    /// Get a reference by name.
    pub fn reference(&self, name: &str) -> Option<&Reference> {
        self.references.iter().find(|r| r.name == name)
    }
}

fn read_error(path: &Path, err: io::Error) -> ManifestError {
    let path = path.to_path_buf();
    if err.kind() == io::ErrorKind::NotFound {
        DocumentError::NotFound { path }.into()
    } else {
        DocumentError::Read { path, source: err }.into()
    }
}

fn parse_document(content: &str, path: &Path) -> Result<Table, DocumentError> {
    content.parse::<Table>().map_err(|source| DocumentError::Syntax {
        path: path.to_path_buf(),
        source,
    })
}

fn validate(
    document: &Table,
    dir: &Path,
    resolver: &dyn PathResolver,
) -> Result<Manifest, ValidationError> {
    raw::warn_unknown_keys(document, &TOP_LEVEL_KEYS, "");

    let package_table = document
        .get("package")
        .ok_or_else(|| raw::missing("package".to_string()))
        .and_then(|value| raw::as_table(value, "package"))?;
    let package = parse_package(package_table)?;

    let target = package_table
        .get("target")
        .map(|value| Target::parse(value, &package.name, dir, resolver))
        .transpose()?;

    let mut src = Vec::new();
    if let Some(table) = raw::opt_table(document, "src", "")? {
        for (name, value) in table {
            src.push(SourceEntry::parse(name, value, dir, resolver)?);
        }
    }

    let mut dependencies = Vec::new();
    if let Some(table) = raw::opt_table(document, "dependencies", "")? {
        for (name, value) in table {
            dependencies.push(Dependency::parse(name, value, dir, resolver)?);
        }
    }

    let mut references = Vec::new();
    if let Some(table) = raw::opt_table(document, "references", "")? {
        for (name, value) in table {
            references.push(Reference::parse(name, value)?);
        }
    }

    tracing::debug!(
        "validated `{}`: {} sources, {} dependencies, {} references",
        package.name,
        src.len(),
        dependencies.len(),
        references.len()
    );

    Ok(Manifest {
        dir: dir.to_path_buf(),
        package,
        target,
        src,
        dependencies,
        references,
    })
}

fn parse_package(table: &Table) -> Result<PackageMetadata, ValidationError> {
    const FIELD: &str = "package";
    raw::warn_unknown_keys(table, &PACKAGE_KEYS, FIELD);

    let name = raw::req_str(table, "name", FIELD)?;
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "package.name".to_string(),
            value: name.to_string(),
            reason: "package name must not be empty".to_string(),
        });
    }

    let version_str = raw::req_str(table, "version", FIELD)?;
    let version = version_str
        .parse::<Version>()
        .map_err(|e| ValidationError::InvalidValue {
            field: "package.version".to_string(),
            value: version_str.to_string(),
            reason: e.to_string(),
        })?;

    let authors = raw::opt_str_array(table, "authors", FIELD)?
        .ok_or_else(|| raw::missing("package.authors".to_string()))?;
    if authors.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "package.authors".to_string(),
            value: "[]".to_string(),
            reason: "at least one author is required".to_string(),
        });
    }

    let optional = |key: &str| -> Result<Option<String>, ValidationError> {
        Ok(raw::opt_str(table, key, FIELD)?.map(str::to_string))
    };

    Ok(PackageMetadata {
        name: name.to_string(),
        version,
        authors,
        description: optional("description")?,
        license: optional("license")?,
        repository: optional("repository")?,
        homepage: optional("homepage")?,
        keywords: raw::opt_str_array(table, "keywords", FIELD)?.unwrap_or_default(),
    })
}

/// Generate a starter vba-block.toml for a new package.
pub fn generate_manifest(name: &str, authors: &[String], target: Option<TargetType>) -> String {
    let name = toml::Value::String(name.to_string());
    let authors = authors
        .iter()
        .map(|a| toml::Value::String(a.clone()).to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let target = target
        .map(|t| format!("target = \"{}\"\n", t))
        .unwrap_or_default();

    format!(
        r#"[package]
name = {name}
version = "0.1.0"
authors = [{authors}]
{target}
[src]

[dependencies]

[references]
"#
    )
}
