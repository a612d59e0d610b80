//! Human-readable lines for the walkthrough. Presentation only.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::Body;
use crate::inspect::{extract_array, extract_str, extract_u64, take_first_n, DisplayPath, PathSegment};

pub fn status_line(label: &str, status: u16) -> String {
    format!("{label} status code: {status}")
}

pub fn watchers_line(entity: &str, watchers: u64) -> String {
    format!("{entity} has {watchers} watchers.")
}

pub fn repo_star_line(url: &str, stars: u64) -> String {
    format!("{url} repo has {stars} stars.")
}

/// One star line per repository in the first `n` entries of a search
/// response's `items`.
pub fn top_repos(search: &Value, n: i64) -> Result<Vec<String>, ApiError> {
    let items = extract_array(search, &["items".into()])?;
    take_first_n(items, n)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let url = extract_str(item, &["html_url".into()]).map_err(|e| within_item(i, e))?;
            let stars = extract_u64(item, &["stargazers_count".into()]).map_err(|e| within_item(i, e))?;
            Ok(repo_star_line(url, stars))
        })
        .collect()
}

/// Re-root an error path found inside `items[index]` at the document root.
fn within_item(index: usize, err: ApiError) -> ApiError {
    let prefix = DisplayPath(&[PathSegment::from("items"), PathSegment::Index(index)]).to_string();
    match err {
        ApiError::FieldNotFound { path } => ApiError::FieldNotFound {
            path: format!("{prefix}.{path}"),
        },
        ApiError::UnexpectedType { path, expected, found } => ApiError::UnexpectedType {
            path: format!("{prefix}.{path}"),
            expected,
            found,
        },
        other => other,
    }
}

/// Pretty-printed JSON, or the raw text for non-JSON bodies.
pub fn pretty(body: &Body) -> String {
    match body {
        Body::Json(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        Body::Text(text) => text.clone(),
    }
}
