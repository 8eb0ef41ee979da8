//! Typed accessors over the untyped manifest document.
//!
//! Each accessor takes the dotted path of the field it reads so that a
//! failure names exactly what is wrong.

use toml::{Table, Value};

use crate::core::errors::ValidationError;

type Result<T> = std::result::Result<T, ValidationError>;

/// Join a parent field path and a key.
pub(crate) fn field(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Human-readable TOML type name.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

pub(crate) fn invalid_type(field: String, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::InvalidType {
        field,
        expected,
        found: type_name(found),
    }
}

pub(crate) fn missing(field: String) -> ValidationError {
    ValidationError::MissingField { field }
}

/// Interpret `value` as a table.
pub(crate) fn as_table<'a>(value: &'a Value, field: &str) -> Result<&'a Table> {
    value
        .as_table()
        .ok_or_else(|| invalid_type(field.to_string(), "a table", value))
}

/// Optional table at `table[key]`.
pub(crate) fn opt_table<'a>(table: &'a Table, key: &str, parent: &str) -> Result<Option<&'a Table>> {
    table
        .get(key)
        .map(|value| as_table(value, &field(parent, key)))
        .transpose()
}

/// Optional string at `table[key]`.
pub(crate) fn opt_str<'a>(table: &'a Table, key: &str, parent: &str) -> Result<Option<&'a str>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(invalid_type(field(parent, key), "a string", other)),
    }
}

/// Required string at `table[key]`.
pub(crate) fn req_str<'a>(table: &'a Table, key: &str, parent: &str) -> Result<&'a str> {
    opt_str(table, key, parent)?.ok_or_else(|| missing(field(parent, key)))
}

/// Optional boolean at `table[key]`.
pub(crate) fn opt_bool(table: &Table, key: &str, parent: &str) -> Result<Option<bool>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::Boolean(b)) => Ok(Some(*b)),
        Some(other) => Err(invalid_type(field(parent, key), "a boolean", other)),
    }
}

/// Optional array of strings at `table[key]`.
pub(crate) fn opt_str_array(table: &Table, key: &str, parent: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = table.get(key) else {
        return Ok(None);
    };
    let path = field(parent, key);
    let items = value
        .as_array()
        .ok_or_else(|| invalid_type(path.clone(), "an array of strings", value))?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(invalid_type(format!("{}[{}]", path, i), "a string", other)),
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Log keys of `table` that are not in `known`.
pub(crate) fn warn_unknown_keys(table: &Table, known: &[&str], parent: &str) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            tracing::warn!("unused manifest key: {}", field(parent, key));
        }
    }
}
