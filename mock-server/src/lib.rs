use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    pub login: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Repo {
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    pub language: String,
    pub watchers: u64,
    pub stargazers_count: u64,
}

impl Repo {
    pub fn new(owner: &str, name: &str, language: &str, stars: u64) -> Self {
        Self {
            name: name.to_string(),
            full_name: format!("{owner}/{name}"),
            owner: Owner {
                login: owner.to_string(),
            },
            html_url: format!("https://github.com/{owner}/{name}"),
            language: language.to_string(),
            watchers: stars,
            stargazers_count: stars,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub total_count: usize,
    pub incomplete_results: bool,
    pub items: Vec<Repo>,
}

pub type Catalog = Arc<Vec<Repo>>;

/// Fixture repositories served by `app()`.
pub fn seed() -> Vec<Repo> {
    vec![
        Repo::new("nnja", "new-computer", "Shell", 1422),
        Repo::new("donnemartin", "system-design-primer", "Python", 280_000),
        Repo::new("public-apis", "public-apis", "Python", 320_000),
        Repo::new("TheAlgorithms", "Python", "Python", 190_000),
        Repo::new("vinta", "awesome-python", "Python", 220_000),
        Repo::new("rust-lang", "rust", "Rust", 98_000),
    ]
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(repos: Vec<Repo>) -> Router {
    let catalog: Catalog = Arc::new(repos);
    Router::new()
        .route("/", get(root))
        .route("/repos/{owner}/{repo}", get(get_repo))
        .route("/search/repositories", get(search_repositories))
        .route("/broken", get(broken))
        .route("/plain", get(plain))
        .route("/binary", get(binary))
        .route("/latin1", get(latin1))
        .fallback(not_found)
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve `app()` on an ephemeral loopback port from a background thread with
/// its own current-thread runtime, for blocking callers. The server lives
/// until the process exits.
pub fn spawn_background() -> Result<SocketAddr, std::io::Error> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::spawn(move || {
        let served = rt.block_on(async {
            let listener = TcpListener::from_std(std_listener)?;
            run(listener).await
        });
        if let Err(e) = served {
            eprintln!("mock server on {addr} stopped: {e}");
        }
    });

    Ok(addr)
}

fn not_found_body() -> Json<Value> {
    Json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest",
        "status": "404"
    }))
}

async fn root() -> Json<Value> {
    Json(json!({
        "current_user_url": "https://api.github.com/user",
        "repository_url": "https://api.github.com/repos/{owner}/{repo}",
        "repository_search_url": "https://api.github.com/search/repositories?q={query}{&page,per_page,sort,order}",
        "user_url": "https://api.github.com/users/{user}"
    }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, not_found_body())
}

async fn get_repo(
    State(catalog): State<Catalog>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<Repo>, (StatusCode, Json<Value>)> {
    let full_name = format!("{owner}/{repo}");
    catalog
        .iter()
        .find(|r| r.full_name.eq_ignore_ascii_case(&full_name))
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, not_found_body()))
}

async fn search_repositories(
    State(catalog): State<Catalog>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, (StatusCode, Json<Value>)> {
    let Some(q) = params.q.filter(|q| !q.trim().is_empty()) else {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "Validation Failed",
                "errors": [{"resource": "Search", "field": "q", "code": "missing"}]
            })),
        ));
    };

    let mut items: Vec<Repo> = catalog
        .iter()
        .filter(|repo| matches_query(repo, &q))
        .cloned()
        .collect();
    if params.sort.as_deref() == Some("stars") {
        items.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    }
    let total_count = items.len();
    items.truncate(params.per_page.unwrap_or(30));

    Ok(Json(SearchResults {
        total_count,
        incomplete_results: false,
        items,
    }))
}

/// `language:<name>` qualifiers match exactly (case-insensitive); bare terms
/// match anywhere in `full_name`.
fn matches_query(repo: &Repo, q: &str) -> bool {
    q.split_whitespace().all(|term| match term.split_once(':') {
        Some(("language", language)) => repo.language.eq_ignore_ascii_case(language),
        Some(_) => true,
        None => repo
            .full_name
            .to_ascii_lowercase()
            .contains(&term.to_ascii_lowercase()),
    })
}

async fn broken() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], r#"{"items": ["#)
}

async fn plain() -> &'static str {
    "api tour mock server"
}

/// Bytes that are not UTF-8, labelled as such.
async fn binary() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        &b"\x89PNG\xff\x00"[..],
    )
}

/// Claims JSON, but the string value is Latin-1 bytes.
async fn latin1() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        &b"{\"name\": \"caf\xe9\"}"[..],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_serializes_with_github_field_names() {
        let repo = Repo::new("nnja", "new-computer", "Shell", 7);
        let json = serde_json::to_value(&repo).unwrap();
        assert_eq!(json["full_name"], "nnja/new-computer");
        assert_eq!(json["owner"]["login"], "nnja");
        assert_eq!(json["html_url"], "https://github.com/nnja/new-computer");
        assert_eq!(json["watchers"], 7);
        assert_eq!(json["stargazers_count"], 7);
    }

    #[test]
    fn language_qualifier_filters() {
        let repo = Repo::new("rust-lang", "rust", "Rust", 1);
        assert!(matches_query(&repo, "language:rust"));
        assert!(!matches_query(&repo, "language:python"));
    }

    #[test]
    fn bare_terms_match_full_name() {
        let repo = Repo::new("rust-lang", "rust", "Rust", 1);
        assert!(matches_query(&repo, "rust-lang language:Rust"));
        assert!(!matches_query(&repo, "tokio"));
    }

    #[test]
    fn unknown_qualifiers_are_ignored() {
        let repo = Repo::new("nnja", "new-computer", "Shell", 1);
        assert!(matches_query(&repo, "stars:>10"));
    }

    #[test]
    fn seed_has_at_least_three_python_repos() {
        let python = seed().iter().filter(|r| r.language == "Python").count();
        assert!(python >= 3);
    }
}
