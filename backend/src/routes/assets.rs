use std::path::Path;
use std::time::SystemTime;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header;
use axum::http::response::Builder as ResponseBuilder;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use serde_json::json;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::core;
use crate::routes::api::ApiError;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to build response: {0}")]
    ResponseBuildError(#[from] http::Error),

    #[error("Failed to read asset {path}: {source}")]
    ReadFailed { path: String, #[source] source: std::io::Error },
}

impl IntoResponse for AssetError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{}", &self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Router fallback: real files from the static root, else the SPA entry document,
/// else a JSON note describing the API. Never shadows `/api/*`.
pub async fn static_handler(
    State(context): State<core::ArcContext>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AssetError> {
    let decoded = percent_decode_str(uri.path()).decode_utf8_lossy();
    let path_str = decoded.trim_start_matches('/');
    if path_str.starts_with("api/") {
        return Ok(ApiError::NotFound.into_response());
    }
    if method != Method::GET && method != Method::HEAD {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let root = &context.static_root;
    if let Some(file_path) = root.find_file(path_str) {
        let if_none_match = headers.get(header::IF_NONE_MATCH).and_then(|v| v.to_str().ok());
        return serve_file(root, &file_path, if_none_match).await;
    }

    let entry = root.entry_document();
    if entry.is_file() {
        if !path_str.is_empty() {
            tracing::info!("Falling back to {} for path: {}", core::ENTRY_DOCUMENT, path_str);
        }
        let data = read_asset(&entry).await?;
        return Ok(create_no_cache_response_builder().body(Body::from(data))?);
    }

    tracing::debug!("No entry document under {}, answering with placeholder", root.dir.display());
    Ok(placeholder_response())
}

async fn serve_file(root: &core::StaticRoot, file_path: &Path, if_none_match: Option<&str>) -> Result<Response, AssetError> {
    if file_path == root.entry_document() {
        let data = read_asset(file_path).await?;
        return Ok(create_no_cache_response_builder().body(Body::from(data))?);
    }

    let data = read_asset(file_path).await?;
    let etag = create_etag(&data);
    if etag_matches(if_none_match, &etag) {
        return Ok(Response::builder()
            .status(StatusCode::NOT_MODIFIED)
            .header(header::ETAG, etag)
            .body(Body::empty())?);
    }

    let modified = tokio::fs::metadata(file_path).await.and_then(|m| m.modified()).ok();
    let builder = create_asset_response_builder(file_path, &etag, modified);
    Ok(builder.body(Body::from(data))?)
}

async fn read_asset(path: &Path) -> Result<Vec<u8>, AssetError> {
    tokio::fs::read(path).await.map_err(|source| AssetError::ReadFailed {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

fn create_no_cache_response_builder() -> ResponseBuilder {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/html")
        .header(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")
}

fn create_asset_response_builder(path: &Path, etag: &str, modified: Option<SystemTime>) -> ResponseBuilder {
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    let builder = Response::builder()
        .header(header::CONTENT_TYPE, mime_type.as_ref())
        .header(header::CACHE_CONTROL, "public, max-age=0, must-revalidate")
        .header(header::ETAG, etag);
    match modified {
        Some(ts) => builder.header(header::LAST_MODIFIED, DateTime::<Utc>::from(ts).to_rfc2822()),
        None => builder,
    }
}

fn create_etag(data: &[u8]) -> String {
    format!("\"{}\"", hex::encode(Sha256::digest(data)))
}

/// `If-None-Match` may carry several comma separated tags or `*`.
fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|value| value.split(',').any(|tag| tag.trim() == etag || tag.trim() == "*"))
}

fn placeholder_response() -> Response {
    Json(json!({
        "message": "The backend server is running. Start the front-end app with its development server.",
        "development_mode": true,
        "instructions": "To run the front-end in development mode, run 'cd frontend && npm start'.",
        "api_endpoints": [
            {"path": "/api/hello", "method": "GET", "description": "Returns a simple greeting message."},
            {"path": "/api/sheet-data", "method": "GET", "description": "Fetches rows from SheetDB."},
            {"path": "/api/save-data", "method": "POST", "description": "Saves rows to the snapshot JSON file."}
        ]
    }))
    .into_response()
}
