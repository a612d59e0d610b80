use tokio::net::TcpListener;

const ROUTES: &[&str] = &[
    "/",
    "/repos/{owner}/{repo}",
    "/search/repositories?q=language:<name>&sort=stars",
    "/broken",
    "/plain",
];

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("MOCK_GITHUB_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;

    println!("mock GitHub API on http://{addr}");
    for route in ROUTES {
        println!("  GET {route}");
    }
    println!("point the tour at it with: api-tour --base-url http://{addr}");

    mock_server::run(listener).await
}
