//! Endpoints and query parameters.
//!
//! # Design
//! An `Endpoint` keeps the parsed base URL and its extra path segments apart
//! until `url()` is called, so segment validation happens once at
//! construction and joining never has to worry about stray slashes. Segments
//! are percent-encoded by `url` when joined.
//!
//! `QueryParams` preserves insertion order so the serialized query string is
//! deterministic, while keeping keys unique.

use std::fmt;

use url::form_urlencoded;
use url::Url;

use crate::error::ApiError;

/// A base URL plus an ordered list of path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
    segments: Vec<String>,
}

impl Endpoint {
    /// Parse `base` as an absolute http(s) URL with no extra segments.
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base).map_err(|e| ApiError::InvalidEndpoint(format!("{base}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ApiError::InvalidEndpoint(format!(
                "{base}: base URL must be an absolute http(s) URL"
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::InvalidEndpoint(format!(
                "{base}: base URL must not carry a query or fragment"
            )));
        }
        Ok(Self {
            base: url,
            segments: Vec::new(),
        })
    }

    /// Split a slash-separated `path` into segments and append them to `base`.
    ///
    /// A single leading or trailing slash is accepted; an empty inner segment
    /// (`//`) is rejected.
    pub fn parse(base: &str, path: &str) -> Result<Self, ApiError> {
        let endpoint = Self::new(base)?;
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Ok(endpoint);
        }
        endpoint.segments(trimmed.split('/'))
    }

    /// Append one path segment.
    pub fn segment(mut self, segment: impl Into<String>) -> Result<Self, ApiError> {
        let segment = segment.into();
        validate_segment(&segment)?;
        self.segments.push(segment);
        Ok(self)
    }

    /// Append several path segments in order.
    pub fn segments<I, S>(self, segments: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        segments
            .into_iter()
            .try_fold(self, |endpoint, segment| endpoint.segment(segment))
    }

    pub fn path_segments(&self) -> &[String] {
        &self.segments
    }

    /// The joined request URL, without a query string.
    pub fn url(&self) -> Url {
        let mut url = self.base.clone();
        if !self.segments.is_empty() {
            // `new` rejects cannot-be-a-base URLs, so this always succeeds.
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(&self.segments);
            }
        }
        url
    }

    /// The joined request URL with `params` appended as a query string.
    pub fn url_with_query(&self, params: Option<&QueryParams>) -> Url {
        let mut url = self.url();
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            url.set_query(Some(&params.to_query_string()));
        }
        url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}

fn validate_segment(segment: &str) -> Result<(), ApiError> {
    if segment.is_empty() {
        return Err(ApiError::InvalidEndpoint("empty path segment".to_string()));
    }
    if segment.contains('/') {
        return Err(ApiError::InvalidEndpoint(format!(
            "path segment {segment:?} contains '/'"
        )));
    }
    if segment == "." || segment == ".." {
        return Err(ApiError::InvalidEndpoint(format!(
            "path segment {segment:?} is a relative reference"
        )));
    }
    Ok(())
}

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(n) => write!(f, "{n}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Ordered query parameters with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`. An existing key keeps its position and the
    /// previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize as `application/x-www-form-urlencoded`, in insertion order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
