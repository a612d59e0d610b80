//! Walkthrough against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `HttpClient` with the
//! real ureq transport over HTTP, checking that URL building, status
//! reporting, JSON decoding, and field extraction line up end to end.

use std::net::SocketAddr;
use std::time::Duration;

use tour_core::inspect::{extract_u64, parse_path};
use tour_core::report::top_repos;
use tour_core::{extract_field, ApiError, Body, ClientConfig, HttpClient, QueryParams};

fn start_server() -> SocketAddr {
    mock_server::spawn_background().unwrap()
}

fn client(addr: SocketAddr) -> HttpClient {
    let config = ClientConfig::new(&format!("http://{addr}")).timeout(Duration::from_secs(5));
    HttpClient::new(config).unwrap()
}

#[test]
fn walkthrough() {
    let client = client(start_server());

    // Step 1: the API root answers with a three-digit status.
    let root = client.get_path("", None).unwrap();
    assert!((100..=599).contains(&root.status));
    assert_eq!(root.status, 200);
    assert!(root.json().unwrap().is_object());

    // Step 2: a known repository carries a non-negative integer `watchers`.
    let repo = client.get_path("/repos/nnja/new-computer", None).unwrap();
    assert_eq!(repo.status, 200);
    let body = repo.json().unwrap();
    assert!(body.is_object());
    assert_eq!(extract_u64(body, &["watchers".into()]).unwrap(), 1422);

    // Step 3: a nonexistent resource is a 404 with no `watchers`.
    let missing = client.get_path("/repositories/doesnt/exist", None).unwrap();
    assert_eq!(missing.status, 404);
    let err = extract_field(missing.json().unwrap(), &["watchers".into()]).unwrap_err();
    assert!(matches!(err, ApiError::FieldNotFound { .. }));

    // Step 4: search with query parameters and format the top three.
    let params = QueryParams::new()
        .with("q", "language:python")
        .with("sort", "stars");
    let search = client.get_path("/search/repositories", Some(&params)).unwrap();
    assert_eq!(search.status, 200);
    let lines = top_repos(search.json().unwrap(), 3).unwrap();
    assert_eq!(
        lines,
        vec![
            "https://github.com/public-apis/public-apis repo has 320000 stars.",
            "https://github.com/donnemartin/system-design-primer repo has 280000 stars.",
            "https://github.com/vinta/awesome-python repo has 220000 stars.",
        ]
    );
}

#[test]
fn nested_fields_resolve_over_http() {
    let client = client(start_server());

    let repo = client.get_path("/repos/rust-lang/rust", None).unwrap();
    let login = extract_field(repo.json().unwrap(), &parse_path("owner.login")).unwrap();
    assert_eq!(login, "rust-lang");
}

#[test]
fn non_json_body_is_raw_text() {
    let client = client(start_server());

    let resp = client.get_path("/plain", None).unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, Body::Text("api tour mock server".to_string()));
}

#[test]
fn malformed_json_still_reports_status() {
    let client = client(start_server());

    let err = client.get_path("/broken", None).unwrap_err();
    assert_eq!(err.status(), Some(200));
    assert!(err.to_string().contains("/broken"));
}

#[test]
fn non_utf8_text_body_keeps_status() {
    let client = client(start_server());

    let resp = client.get_path("/binary", None).unwrap();
    assert_eq!(resp.status, 200);
    let text = resp.body.as_text().unwrap();
    assert!(text.contains("PNG"));
    assert!(text.contains('\u{FFFD}'));
}

#[test]
fn non_utf8_json_body_is_a_decode_error_with_status() {
    let client = client(start_server());

    let err = client.get_path("/latin1", None).unwrap_err();
    assert_eq!(err.status(), Some(200));
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[test]
fn body_over_configured_limit_keeps_status() {
    let addr = start_server();
    let config = ClientConfig::new(&format!("http://{addr}"))
        .timeout(Duration::from_secs(5))
        .max_body_bytes(16);
    let client = HttpClient::new(config).unwrap();

    let err = client.get_path("/repos/nnja/new-computer", None).unwrap_err();
    assert_eq!(err.status(), Some(200));
    assert!(matches!(err, ApiError::Body { .. }));
}

#[test]
fn validation_failure_is_data_not_error() {
    let client = client(start_server());

    let resp = client.get_path("/search/repositories", None).unwrap();
    assert_eq!(resp.status, 422);
    assert!(!resp.is_success());
    assert!(top_repos(resp.json().unwrap(), 3).is_err());
}
