use manuscript_counter::{server, CountService, FileDocument, RegionCounter, ResourceLocks};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const MANUSCRIPT: &str = "\
intro line
<<<<<START
Hello \\command{arg} world
% this is a comment to drop
>>>>>END
trailing
";

async fn spawn_server(document: &Path, index: &Path, goal: u64) -> String {
    let service = Arc::new(CountService::new(
        Arc::new(RegionCounter::default()),
        Arc::new(FileDocument::new(document)),
        ResourceLocks::new(),
        goal,
    ));

    let listener = server::bind("127.0.0.1", 0).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server::serve(listener, server::router(service, index)));

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_count_endpoint_returns_length_and_goal() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("novel.tex");
    std::fs::write(&document, MANUSCRIPT).unwrap();

    let base = spawn_server(&document, &temp_dir.path().join("index.html"), 800).await;
    let response = reqwest::get(format!("{}/count", base)).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "length": 12, "goal": 800 }));
}

#[tokio::test]
async fn test_missing_document_is_server_error() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("absent.tex");

    let base = spawn_server(&document, &temp_dir.path().join("index.html"), 0).await;
    let response = reqwest::get(format!("{}/count", base)).await.unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("IO error"));
    assert!(body.get("length").is_none());
}

#[tokio::test]
async fn test_document_is_reread_per_request() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("novel.tex");
    std::fs::write(&document, "<<<<<START\nabc\n").unwrap();

    let base = spawn_server(&document, &temp_dir.path().join("index.html"), 0).await;
    let url = format!("{}/count", base);

    let first: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(first["length"], 3);

    std::fs::write(&document, "<<<<<START\nabc\ndefgh\n").unwrap();
    let second: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(second["length"], 8);
}

#[tokio::test]
async fn test_concurrent_requests_agree() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("novel.tex");
    let body: String = std::iter::once("<<<<<START\n".to_string())
        .chain((0..2000).map(|i| format!("line {} with 漢字 and \\ruby{{x}}{{y}}\n", i)))
        .collect();
    std::fs::write(&document, &body).unwrap();

    let base = spawn_server(&document, &temp_dir.path().join("index.html"), 0).await;
    let url = format!("{}/count", base);
    let client = reqwest::Client::new();

    let requests: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            let url = url.clone();
            tokio::spawn(async move {
                let value: serde_json::Value =
                    client.get(&url).send().await.unwrap().json().await.unwrap();
                value["length"].as_u64().unwrap()
            })
        })
        .collect();

    let mut lengths = Vec::new();
    for request in requests {
        lengths.push(request.await.unwrap());
    }

    let expected: u64 = (0..2000)
        .map(|i| format!("line {} with 漢字 and ", i).chars().count() as u64)
        .sum();
    assert!(lengths.iter().all(|&length| length == expected));
}

#[tokio::test]
async fn test_index_page_is_served() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("novel.tex");
    let index = temp_dir.path().join("index.html");
    std::fs::write(&document, "").unwrap();
    std::fs::write(&index, "<html><body>counter</body></html>").unwrap();

    let base = spawn_server(&document, &index, 0).await;
    let response = reqwest::get(format!("{}/", base)).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "<html><body>counter</body></html>");
}
