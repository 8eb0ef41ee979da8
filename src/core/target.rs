//! Build target - the Office document a package is built into.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use toml::Value;

use crate::core::errors::ValidationError;
use crate::core::raw;
use crate::util::paths::PathResolver;

/// The kind of document a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// Excel macro-enabled workbook
    Xlsm,
    /// Excel add-in
    Xlam,
    /// Excel macro-enabled template
    Xltm,
    /// Excel binary workbook
    Xlsb,
    /// Word macro-enabled document
    Docm,
    /// Word macro-enabled template
    Dotm,
    /// PowerPoint macro-enabled presentation
    Pptm,
    /// PowerPoint macro-enabled template
    Potm,
    /// PowerPoint add-in
    Ppam,
    /// Access database
    Accdb,
    /// Access add-in
    Accda,
}

/// Office application hosting a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Application {
    Excel,
    Word,
    PowerPoint,
    Access,
}

impl TargetType {
    pub const ALL: [TargetType; 11] = [
        TargetType::Xlsm,
        TargetType::Xlam,
        TargetType::Xltm,
        TargetType::Xlsb,
        TargetType::Docm,
        TargetType::Dotm,
        TargetType::Pptm,
        TargetType::Potm,
        TargetType::Ppam,
        TargetType::Accdb,
        TargetType::Accda,
    ];

    /// File extension (without the dot), which is also the manifest spelling.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetType::Xlsm => "xlsm",
            TargetType::Xlam => "xlam",
            TargetType::Xltm => "xltm",
            TargetType::Xlsb => "xlsb",
            TargetType::Docm => "docm",
            TargetType::Dotm => "dotm",
            TargetType::Pptm => "pptm",
            TargetType::Potm => "potm",
            TargetType::Ppam => "ppam",
            TargetType::Accdb => "accdb",
            TargetType::Accda => "accda",
        }
    }

    pub fn application(&self) -> Application {
        match self {
            TargetType::Xlsm | TargetType::Xlam | TargetType::Xltm | TargetType::Xlsb => {
                Application::Excel
            }
            TargetType::Docm | TargetType::Dotm => Application::Word,
            TargetType::Pptm | TargetType::Potm | TargetType::Ppam => Application::PowerPoint,
            TargetType::Accdb | TargetType::Accda => Application::Access,
        }
    }

    /// Directory used when a target is declared by type alone, relative to
    /// the manifest directory.
    pub fn default_path(&self) -> PathBuf {
        Path::new("target").join(self.extension())
    }

    /// Comma-separated list of every supported type, for error messages.
    pub fn supported() -> String {
        TargetType::ALL
            .iter()
            .map(|t| t.extension())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TargetType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetType::ALL
            .into_iter()
            .find(|t| t.extension() == s)
            .ok_or(())
    }
}

/// A normalized build target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    #[serde(rename = "type")]
    pub target_type: TargetType,

    /// Document name, without extension
    pub name: String,

    /// Absolute directory the document is built into
    pub path: PathBuf,
}

impl Target {
    /// `<name>.<extension>`
    pub fn filename(&self) -> String {
        format!("{}.{}", self.name, self.target_type.extension())
    }

    /// Absolute path of the built document.
    pub fn output_path(&self) -> PathBuf {
        self.path.join(self.filename())
    }

    /// Normalize the raw `package.target` value.
    ///
    /// A string is shorthand for `{ type = <string> }` named after the package
    /// and placed at the type's default path. A table must spell out `type`,
    /// `name` and `path`.
    pub(crate) fn parse(
        value: &Value,
        package_name: &str,
        dir: &Path,
        resolver: &dyn PathResolver,
    ) -> Result<Self, ValidationError> {
        const FIELD: &str = "package.target";

        match value {
            Value::String(type_str) => {
                let target_type = parse_type(type_str, FIELD)?;
                Ok(Target {
                    target_type,
                    name: package_name.to_string(),
                    path: resolver.resolve(dir, &target_type.default_path()),
                })
            }
            Value::Table(table) => {
                raw::warn_unknown_keys(table, &["type", "name", "path"], FIELD);

                let target_type = parse_type(
                    raw::req_str(table, "type", FIELD)?,
                    &raw::field(FIELD, "type"),
                )?;
                let name = raw::req_str(table, "name", FIELD)?;
                let path = raw::req_str(table, "path", FIELD)?;

                Ok(Target {
                    target_type,
                    name: name.to_string(),
                    path: resolver.resolve(dir, Path::new(path)),
                })
            }
            other => Err(raw::invalid_type(
                FIELD.to_string(),
                "a string or a table",
                other,
            )),
        }
    }
}

fn parse_type(value: &str, field: &str) -> Result<TargetType, ValidationError> {
    value
        .parse()
        .map_err(|_| ValidationError::UnknownTargetType {
            field: field.to_string(),
            value: value.to_string(),
            supported: TargetType::supported(),
        })
}
