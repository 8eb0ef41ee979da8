//! COM type-library references declared under `[references]`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use toml::Value;

use crate::core::errors::ValidationError;
use crate::core::raw;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)$").expect("valid version pattern"));

static GUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:\{[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}\}|[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12})$",
    )
    .expect("valid guid pattern")
});

/// Two-part type-library version, e.g. `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceVersion {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for ReferenceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Serialize for ReferenceVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A reference to an external type library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub name: String,
    pub version: ReferenceVersion,

    /// GUID in braced upper-case form, `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`
    pub guid: String,

    pub optional: bool,
}

impl Reference {
    pub(crate) fn parse(name: &str, value: &Value) -> Result<Self, ValidationError> {
        let field = raw::field("references", name);
        let table = raw::as_table(value, &field)?;
        raw::warn_unknown_keys(table, &["version", "guid", "optional"], &field);

        let version = parse_version(
            raw::req_str(table, "version", &field)?,
            &raw::field(&field, "version"),
        )?;
        let guid = parse_guid(
            raw::req_str(table, "guid", &field)?,
            &raw::field(&field, "guid"),
        )?;
        let optional = raw::opt_bool(table, "optional", &field)?.unwrap_or(false);

        Ok(Reference {
            name: name.to_string(),
            version,
            guid,
            optional,
        })
    }
}

fn parse_version(value: &str, field: &str) -> Result<ReferenceVersion, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let caps = VERSION_PATTERN
        .captures(value)
        .ok_or_else(|| invalid("expected a `major.minor` version such as \"1.0\""))?;

    let major = caps[1]
        .parse()
        .map_err(|_| invalid("major version is out of range"))?;
    let minor = caps[2]
        .parse()
        .map_err(|_| invalid("minor version is out of range"))?;

    Ok(ReferenceVersion { major, minor })
}

fn parse_guid(value: &str, field: &str) -> Result<String, ValidationError> {
    if !GUID_PATTERN.is_match(value) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "expected a GUID such as {420B2830-E718-11CF-893D-00A0C9054228}".to_string(),
        });
    }

    let bare = value.trim_start_matches('{').trim_end_matches('}');
    Ok(format!("{{{}}}", bare.to_ascii_uppercase()))
}
