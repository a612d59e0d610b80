//! Field extraction from decoded JSON.
//!
//! Pure functions over `serde_json::Value`; nothing here knows about HTTP.
//! A path that does not resolve is always an error naming the path, never a
//! silent `null`. A `null` that is actually present in the document is
//! returned as-is.

use std::fmt;

use serde_json::Value;

use crate::error::ApiError;

/// One step into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Renders a path as `items[0].html_url`.
pub struct DisplayPath<'a>(pub &'a [PathSegment]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Parse a dotted path such as `"items.0.html_url"`. Components made only of
/// ASCII digits become indices.
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('.')
        .map(|part| match part.parse::<usize>() {
            Ok(index) if part.bytes().all(|b| b.is_ascii_digit()) => PathSegment::Index(index),
            _ => PathSegment::Key(part.to_string()),
        })
        .collect()
}

/// Follow `path` through nested objects and arrays.
pub fn extract_field<'a>(value: &'a Value, path: &[PathSegment]) -> Result<&'a Value, ApiError> {
    let mut current = value;
    for (depth, segment) in path.iter().enumerate() {
        let next = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key),
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
            _ => None,
        };
        current = next.ok_or_else(|| ApiError::FieldNotFound {
            path: DisplayPath(&path[..=depth]).to_string(),
        })?;
    }
    Ok(current)
}

pub fn extract_str<'a>(value: &'a Value, path: &[PathSegment]) -> Result<&'a str, ApiError> {
    let field = extract_field(value, path)?;
    field.as_str().ok_or_else(|| unexpected(path, "string", field))
}

/// A non-negative integer field, such as a count.
pub fn extract_u64(value: &Value, path: &[PathSegment]) -> Result<u64, ApiError> {
    let field = extract_field(value, path)?;
    field
        .as_u64()
        .ok_or_else(|| unexpected(path, "non-negative integer", field))
}

pub fn extract_array<'a>(value: &'a Value, path: &[PathSegment]) -> Result<&'a [Value], ApiError> {
    let field = extract_field(value, path)?;
    field
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| unexpected(path, "array", field))
}

/// The first `n` elements of `values`, or all of them when there are fewer.
pub fn take_first_n<T>(values: &[T], n: i64) -> Result<&[T], ApiError> {
    let n = usize::try_from(n)
        .map_err(|_| ApiError::InvalidArgument(format!("count must be non-negative, got {n}")))?;
    Ok(&values[..n.min(values.len())])
}

/// JSON type name used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(path: &[PathSegment], expected: &'static str, found: &Value) -> ApiError {
    ApiError::UnexpectedType {
        path: DisplayPath(path).to_string(),
        expected,
        found: type_name(found),
    }
}
