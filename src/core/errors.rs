//! Manifest error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error produced while loading or validating a manifest.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ManifestError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),
}

/// The manifest document could not be read or is not valid TOML.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum DocumentError {
    #[error("could not find manifest at {}", .path.display())]
    #[diagnostic(
        code(vba::manifest::not_found),
        help("Run `vba init` to create a new project")
    )]
    NotFound { path: PathBuf },

    #[error("failed to read manifest {}", .path.display())]
    #[diagnostic(code(vba::manifest::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not resolve manifest directory `{}`", .path.display())]
    #[diagnostic(code(vba::manifest::location))]
    Location {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}", .path.display())]
    #[diagnostic(code(vba::manifest::syntax))]
    Syntax {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A manifest field failed a shape, type or pattern check.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    #[diagnostic(code(vba::manifest::missing_field))]
    MissingField { field: String },

    #[error("invalid type for `{field}`: expected {expected}, found {found}")]
    #[diagnostic(code(vba::manifest::invalid_type))]
    InvalidType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid value for `{field}` ({value:?}): {reason}")]
    #[diagnostic(code(vba::manifest::invalid_value))]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("unknown target type {value:?} for `{field}`")]
    #[diagnostic(
        code(vba::manifest::unknown_target),
        help("supported target types: {supported}")
    )]
    UnknownTargetType {
        field: String,
        value: String,
        supported: String,
    },

    #[error("dependency `{name}` must specify one of `version`, `path`, or `git`")]
    #[diagnostic(
        code(vba::manifest::missing_locator),
        help("use a version string, or a table with `path` or `git`")
    )]
    MissingLocator { name: String },

    #[error("dependency `{name}` specifies conflicting fields: {}", format_fields(.fields))]
    #[diagnostic(code(vba::manifest::ambiguous_dependency))]
    AmbiguousDependency {
        name: String,
        fields: Vec<&'static str>,
    },
}

fn format_fields(fields: &[&'static str]) -> String {
    fields
        .iter()
        .map(|f| format!("`{}`", f))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Dotted path of the offending field, e.g. `references.a.guid`.
    pub fn field(&self) -> String {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::InvalidType { field, .. }
            | ValidationError::InvalidValue { field, .. }
            | ValidationError::UnknownTargetType { field, .. } => field.clone(),
            ValidationError::MissingLocator { name }
            | ValidationError::AmbiguousDependency { name, .. } => {
                format!("dependencies.{}", name)
            }
        }
    }
}

impl ManifestError {
    /// Whether the document itself was unreadable or unparsable.
    pub fn is_document_error(&self) -> bool {
        matches!(self, ManifestError::Document(_))
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::Document(DocumentError::NotFound { path }) => {
                Diagnostic::error(self.to_string())
                    .with_location(path)
                    .with_suggestion(suggestions::NO_MANIFEST)
            }
            ManifestError::Document(DocumentError::Read { path, source })
            | ManifestError::Document(DocumentError::Location { path, source }) => {
                Diagnostic::error(self.to_string())
                    .with_location(path)
                    .with_context(source.to_string())
            }
            ManifestError::Document(DocumentError::Syntax { path, source }) => {
                Diagnostic::error("manifest is not valid TOML")
                    .with_location(path)
                    .with_context(source.message().to_string())
            }
            ManifestError::Validation(err) => {
                let mut diag = Diagnostic::error(err.to_string())
                    .with_context(format!("in field `{}`", err.field()));
                match err {
                    ValidationError::UnknownTargetType { supported, .. } => {
                        diag = diag.with_suggestion(format!("Use one of: {}", supported));
                    }
                    ValidationError::MissingLocator { .. }
                    | ValidationError::AmbiguousDependency { .. } => {
                        diag = diag.with_suggestion(suggestions::DEPENDENCY_SHAPE);
                    }
                    _ => {}
                }
                diag
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_errors_name_field() {
        let err = ValidationError::AmbiguousDependency {
            name: "web".to_string(),
            fields: vec!["version", "git"],
        };
        assert_eq!(err.field(), "dependencies.web");
        assert_eq!(
            err.to_string(),
            "dependency `web` specifies conflicting fields: `version`, `git`"
        );
    }

    #[test]
    fn test_validation_diagnostic() {
        let err = ManifestError::from(ValidationError::MissingField {
            field: "package.name".to_string(),
        });
        assert!(!err.is_document_error());

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: missing required field `package.name`"));
        assert!(output.contains("in field `package.name`"));
    }
}
