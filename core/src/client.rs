//! Synchronous GET client.
//!
//! # Design
//! `HttpClient` holds only its configuration and a transport, and carries no
//! mutable state between calls. A GET is split the same way at every call
//! site: `build_get` produces an `HttpRequest`, the transport executes it,
//! and `parse_response` turns the raw response into an `ApiResponse`. Each
//! half can be exercised on its own.

use std::time::Instant;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, QueryParams};
use crate::error::ApiError;
use crate::http::{ApiResponse, Body, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Blocking client for a JSON REST API.
#[derive(Debug, Clone)]
pub struct HttpClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl HttpClient<UreqTransport> {
    /// Client backed by a `ureq` agent using `config.timeout` and
    /// `config.max_body_bytes`.
    ///
    /// Fails when `config.base_url` is not an absolute http(s) URL.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = UreqTransport::new(config.timeout, config.max_body_bytes);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ApiError> {
        Endpoint::new(&config.base_url)?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// An endpoint under the configured base URL, e.g. `"/repos/nnja/new-computer"`.
    pub fn endpoint(&self, path: &str) -> Result<Endpoint, ApiError> {
        Endpoint::parse(&self.config.base_url, path)
    }

    pub fn build_get(&self, endpoint: &Endpoint, params: Option<&QueryParams>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: endpoint.url_with_query(params).to_string(),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("user-agent".to_string(), self.config.user_agent.clone()),
            ],
        }
    }

    /// Decode a raw response fetched from `url`.
    ///
    /// JSON content types are parsed; anything else is kept as text, with
    /// invalid UTF-8 replaced. A JSON content type with an unparsable body,
    /// including one that is not UTF-8, is a `Decode` error carrying the
    /// status code.
    pub fn parse_response(&self, url: &str, response: HttpResponse) -> Result<ApiResponse, ApiError> {
        let status = response.status;
        if !response.is_json() || response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse {
                status,
                body: Body::Text(String::from_utf8_lossy(&response.body).into_owned()),
            });
        }
        match serde_json::from_slice(&response.body) {
            Ok(value) => Ok(ApiResponse {
                status,
                body: Body::Json(value),
            }),
            Err(e) => {
                warn!(url, status, error = %e, "response body is not valid JSON");
                Err(ApiError::Decode {
                    status,
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Issue one GET against `endpoint` with optional query parameters.
    pub fn get(&self, endpoint: &Endpoint, params: Option<&QueryParams>) -> Result<ApiResponse, ApiError> {
        let request = self.build_get(endpoint, params);
        let started = Instant::now();
        let response = self.transport.execute(&request)?;
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        self.parse_response(&request.url, response)
    }

    /// `get` on a path under the configured base URL.
    pub fn get_path(&self, path: &str, params: Option<&QueryParams>) -> Result<ApiResponse, ApiError> {
        let endpoint = self.endpoint(path)?;
        self.get(&endpoint, params)
    }
}
