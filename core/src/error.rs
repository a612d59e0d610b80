//! Error types for the API tour client.
//!
//! # Design
//! Every variant carries the URL or JSON path it concerns so a caller can
//! print a readable message without extra bookkeeping. `Decode` and `Body`
//! keep the status code because a body that fails to parse or to arrive must
//! not hide the fact that the server answered. Non-2xx statuses are not
//! errors at all: they come back as data on `ApiResponse`.

use thiserror::Error;

/// Errors returned by `HttpClient`, the transports, and the inspector.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, or a
    /// timeout before the status line).
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// The status line and headers arrived but the body could not be read in
    /// full (connection dropped, timeout, or over the configured size limit).
    #[error("HTTP {status} from {url}: body could not be read: {message}")]
    Body {
        status: u16,
        url: String,
        message: String,
    },

    /// The response declared a JSON content type but its body did not parse.
    #[error("HTTP {status} from {url}: body is not valid JSON: {message}")]
    Decode {
        status: u16,
        url: String,
        message: String,
    },

    /// A path segment did not resolve inside a decoded JSON value.
    #[error("field not found: {path}")]
    FieldNotFound { path: String },

    /// The value at `path` exists but has the wrong JSON type.
    #[error("field {path} is {found}, expected {expected}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The caller passed an argument outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A base URL or path segment could not form a valid endpoint.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ApiError {
    /// The HTTP status code, when a response was received before the failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Decode { status, .. } | ApiError::Body { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_keeps_status_and_url() {
        let err = ApiError::Decode {
            status: 200,
            url: "http://localhost/broken".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(err.status(), Some(200));
        let msg = err.to_string();
        assert!(msg.contains("HTTP 200"));
        assert!(msg.contains("http://localhost/broken"));
    }

    #[test]
    fn unreadable_body_keeps_status() {
        let err = ApiError::Body {
            status: 200,
            url: "http://localhost/large".to_string(),
            message: "body exceeds limit".to_string(),
        };
        assert_eq!(err.status(), Some(200));
        assert!(err.to_string().starts_with("HTTP 200 from http://localhost/large"));
    }

    #[test]
    fn field_not_found_names_the_path() {
        let err = ApiError::FieldNotFound {
            path: "items[0].html_url".to_string(),
        };
        assert_eq!(err.to_string(), "field not found: items[0].html_url");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport {
            url: "http://127.0.0.1:1/".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("transport error for http://127.0.0.1:1/"));
    }
}
