//! Synchronous client core for touring a GitHub-style REST API.
//!
//! # Overview
//! Issues single blocking GET requests, reports the status code, decodes JSON
//! bodies, and pulls named fields out of the decoded documents.
//!
//! # Design
//! - `HttpClient` is stateless: it holds only a `ClientConfig` and a
//!   `Transport`.
//! - A GET is split into `build_get` (produces a plain-data request) and
//!   `parse_response` (consumes a plain-data response), with the transport
//!   in between, so decoding rules are testable without sockets.
//! - Non-2xx statuses are data, not errors. Errors are reserved for failures
//!   that leave the caller without a usable answer.
//! - `inspect` works on `serde_json::Value` only and never sees the network.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod inspect;
pub mod report;
pub mod transport;

pub use client::HttpClient;
pub use config::ClientConfig;
pub use endpoint::{Endpoint, ParamValue, QueryParams};
pub use error::ApiError;
pub use http::{ApiResponse, Body, HttpMethod, HttpRequest, HttpResponse};
pub use inspect::{extract_field, take_first_n, PathSegment};
pub use transport::{Transport, UreqTransport};
