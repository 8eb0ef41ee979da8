//! Source components declared under `[src]`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use toml::Value;

use crate::core::errors::ValidationError;
use crate::core::raw;
use crate::util::paths::PathResolver;

/// A source file that becomes one component of the build graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEntry {
    /// Component name (the `[src]` key)
    pub name: String,

    /// Absolute path of the exported source file
    pub path: PathBuf,

    /// Absolute path of a binary counterpart (e.g. the `.frx` of a form)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,

    /// Missing files are skipped instead of failing the build
    pub optional: bool,
}

impl SourceEntry {
    /// Normalize one `[src]` entry.
    ///
    /// `A = "src/a.bas"` is shorthand for `A = { path = "src/a.bas" }`.
    /// A table must contain `path`, even when it is `optional`.
    pub(crate) fn parse(
        name: &str,
        value: &Value,
        dir: &Path,
        resolver: &dyn PathResolver,
    ) -> Result<Self, ValidationError> {
        let field = raw::field("src", name);

        match value {
            Value::String(path) => Ok(SourceEntry {
                name: name.to_string(),
                path: resolver.resolve(dir, Path::new(path)),
                binary: None,
                optional: false,
            }),
            Value::Table(table) => {
                raw::warn_unknown_keys(table, &["path", "binary", "optional"], &field);

                let path = raw::req_str(table, "path", &field)?;
                let binary = raw::opt_str(table, "binary", &field)?;
                let optional = raw::opt_bool(table, "optional", &field)?.unwrap_or(false);

                Ok(SourceEntry {
                    name: name.to_string(),
                    path: resolver.resolve(dir, Path::new(path)),
                    binary: binary.map(|b| resolver.resolve(dir, Path::new(b))),
                    optional,
                })
            }
            other => Err(raw::invalid_type(field, "a path string or a table", other)),
        }
    }

    /// File extension of the source path, lowercased.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::paths::RootedResolver;

    fn dir() -> PathBuf {
        PathBuf::from(if cfg!(windows) { r"C:\book" } else { "/book" })
    }

    fn value(content: &str) -> Value {
        toml::from_str::<toml::Table>(&format!("v = {}", content))
            .unwrap()
            .remove("v")
            .unwrap()
    }

    #[test]
    fn test_string_shorthand() {
        let resolver = RootedResolver::new(dir());
        let entry = SourceEntry::parse("A", &value(r#""src/a.bas""#), &dir(), &resolver).unwrap();
        assert_eq!(entry.path, dir().join("src").join("a.bas"));
        assert_eq!(entry.binary, None);
        assert!(!entry.optional);
        assert_eq!(entry.extension().as_deref(), Some("bas"));
    }

    #[test]
    fn test_table_with_binary() {
        let resolver = RootedResolver::new(dir());
        let entry = SourceEntry::parse(
            "C",
            &value(r#"{ path = "src/c.frm", binary = "src/c.frx", optional = true }"#),
            &dir(),
            &resolver,
        )
        .unwrap();
        assert_eq!(entry.binary, Some(dir().join("src").join("c.frx")));
        assert!(entry.optional);
    }

    #[test]
    fn test_optional_does_not_replace_path() {
        let resolver = RootedResolver::new(dir());
        let err = SourceEntry::parse(
            "missing_path",
            &value("{ optional = true }"),
            &dir(),
            &resolver,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));
        assert_eq!(err.field(), "src.missing_path.path");
    }

    #[test]
    fn test_wrong_type() {
        let resolver = RootedResolver::new(dir());
        let err = SourceEntry::parse("A", &value("42"), &dir(), &resolver).unwrap_err();
        assert_eq!(err.field(), "src.A");
    }
}
