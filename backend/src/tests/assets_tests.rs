use std::fs;
use std::path::Path;

use axum::http::StatusCode;
use axum::http::header;
use serde_json::Value;
use tempfile::TempDir;

use super::support::{create_test_server, settings_in};
use crate::core;

const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"root\"></div></body></html>";

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_root_serves_entry_document() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/index.html"), INDEX_HTML);
    let server = create_test_server(settings_in(dir.path()));

    let response = server.get("/").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), INDEX_HTML);
    assert_eq!(response.header(header::CONTENT_TYPE), "text/html");
    assert_eq!(response.header(header::CACHE_CONTROL), "no-cache, no-store, must-revalidate");
}

#[tokio::test]
async fn test_existing_file_is_served_with_its_content_type() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/index.html"), INDEX_HTML);
    write_file(&dir.path().join("public/static/js/main.js"), "console.log('hi');");
    let server = create_test_server(settings_in(dir.path()));

    let response = server.get("/static/js/main.js").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "console.log('hi');");
    let content_type = response.header(header::CONTENT_TYPE);
    assert!(content_type.to_str().unwrap().contains("javascript"));
    assert!(response.header(header::ETAG).to_str().unwrap().starts_with('"'));
    assert!(!response.header(header::LAST_MODIFIED).is_empty());
}

#[tokio::test]
async fn test_matching_etag_returns_not_modified() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/manifest.json"), "{\"short_name\":\"Leads\"}");
    let server = create_test_server(settings_in(dir.path()));

    let first = server.get("/manifest.json").await;
    first.assert_status(StatusCode::OK);
    let etag = first.header(header::ETAG);

    let second = server.get("/manifest.json").add_header(header::IF_NONE_MATCH, etag.clone()).await;

    second.assert_status(StatusCode::NOT_MODIFIED);
    assert_eq!(second.header(header::ETAG), etag);
    assert!(second.as_bytes().is_empty());
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_entry_document() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/index.html"), INDEX_HTML);
    let server = create_test_server(settings_in(dir.path()));

    let response = server.get("/some/nonexistent/route").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), INDEX_HTML);
}

#[tokio::test]
async fn test_build_dir_is_preferred_over_public_dir() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/index.html"), "public");
    write_file(&dir.path().join("build/index.html"), "build");
    let server = create_test_server(settings_in(dir.path()));

    let response = server.get("/dashboard").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "build");
}

#[tokio::test]
async fn test_missing_entry_document_returns_placeholder() {
    let dir = TempDir::new().unwrap();
    let server = create_test_server(settings_in(dir.path()));

    let response = server.get("/some/nonexistent/route").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["development_mode"], true);
    assert!(body["message"].is_string());
    assert!(body["instructions"].is_string());
    let paths: Vec<&str> = body["api_endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["/api/hello", "/api/sheet-data", "/api/save-data"]);
}

#[tokio::test]
async fn test_api_paths_never_fall_back_to_entry_document() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/index.html"), INDEX_HTML);
    let server = create_test_server(settings_in(dir.path()));

    let response = server.get("/api/unknown/deeper").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["detail"], "API endpoint not found");
}

#[tokio::test]
async fn test_non_get_method_on_asset_route() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/index.html"), INDEX_HTML);
    let server = create_test_server(settings_in(dir.path()));

    let response = server.post("/dashboard").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn test_static_root_resolution() {
    let dir = TempDir::new().unwrap();
    let settings = settings_in(dir.path()).assets;

    let root = core::StaticRoot::resolve(&settings);
    assert_eq!(root.kind, core::StaticRootKind::Public);
    assert_eq!(root.dir, settings.public_dir);

    fs::create_dir_all(&settings.build_dir).unwrap();
    let root = core::StaticRoot::resolve(&settings);
    assert_eq!(root.kind, core::StaticRootKind::Build);
    assert_eq!(root.entry_document(), settings.build_dir.join("index.html"));
}

#[test]
fn test_find_file_stays_inside_root() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("secret.txt"), "secret");
    write_file(&dir.path().join("public/robots.txt"), "User-agent: *");
    let root = core::StaticRoot::resolve(&settings_in(dir.path()).assets);

    assert!(root.find_file("robots.txt").is_some());
    assert!(root.find_file("../secret.txt").is_none());
    assert!(root.find_file("").is_none());
    assert!(root.find_file("missing.png").is_none());
}

#[tokio::test]
async fn test_percent_encoded_file_names_are_decoded() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/index.html"), INDEX_HTML);
    write_file(&dir.path().join("public/my logo.svg"), "<svg/>");
    write_file(&dir.path().join("public/로고.txt"), "logo");
    let server = create_test_server(settings_in(dir.path()));

    let response = server.get("/my%20logo.svg").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "<svg/>");
    assert!(response.header(header::CONTENT_TYPE).to_str().unwrap().contains("svg"));

    let response = server.get("/%EB%A1%9C%EA%B3%A0.txt").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "logo");
}

#[tokio::test]
async fn test_encoded_traversal_falls_back_to_entry_document() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("secret.txt"), "secret");
    write_file(&dir.path().join("public/index.html"), INDEX_HTML);
    let server = create_test_server(settings_in(dir.path()));

    let response = server.get("/..%2Fsecret.txt").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), INDEX_HTML);
}

#[tokio::test]
async fn test_nested_index_is_served_as_a_regular_file() {
    let dir = TempDir::new().unwrap();
    write_file(&dir.path().join("public/index.html"), INDEX_HTML);
    write_file(&dir.path().join("public/docs/index.html"), "<p>docs</p>");
    let server = create_test_server(settings_in(dir.path()));

    let nested = server.get("/docs/index.html").await;
    nested.assert_status(StatusCode::OK);
    assert_eq!(nested.text(), "<p>docs</p>");
    assert!(nested.header(header::ETAG).to_str().unwrap().starts_with('"'));

    let entry = server.get("/index.html").await;
    entry.assert_status(StatusCode::OK);
    assert_eq!(entry.header(header::CACHE_CONTROL), "no-cache, no-store, must-revalidate");
}
