//! Executing `HttpRequest`s.
//!
//! # Design
//! `Transport` is the only seam that touches the network. `UreqTransport`
//! is the blocking implementation used by the binary; tests substitute
//! canned transports to exercise decoding without sockets.

use std::time::Duration;

use ureq::Agent;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one request and returns the raw response.
///
/// Any status code, including 4xx and 5xx, is a successful round-trip.
/// Only failures that prevent a response from being read are errors.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    max_body_bytes: u64,
}

impl UreqTransport {
    /// Build an agent that returns every status as data, gives up after
    /// `timeout`, and reads at most `max_body_bytes` of each body.
    pub fn new(timeout: Duration, max_body_bytes: u64) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self {
            agent,
            max_body_bytes,
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let transport_error = |e: ureq::Error| ApiError::Transport {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // Bytes, not text: charset problems belong to decoding, and the status
        // must survive a body that cannot be read.
        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body_bytes)
            .read_to_vec()
            .map_err(|e| ApiError::Body {
                status,
                url: request.url.clone(),
                message: e.to_string(),
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
