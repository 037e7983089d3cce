use std::path::Path;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

pub type Record = Map<String, Value>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to create snapshot directory {path}: {source}")]
    CreateDirFailed { path: String, #[source] source: std::io::Error },

    #[error("Failed to write snapshot {path}: {source}")]
    WriteFailed { path: String, #[source] source: std::io::Error },

    #[error("Failed to read snapshot {path}: {source}")]
    ReadFailed { path: String, #[source] source: std::io::Error },

    #[error("Snapshot is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Replaces the snapshot file with `records`.
///
/// The file is truncated and rewritten in place: there is no lock and no
/// temp-file rename, so concurrent saves race and the last one to finish wins.
pub async fn write_snapshot(path: &Path, records: &[Record]) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|source| Error::CreateDirFailed {
            path: parent.to_string_lossy().to_string(),
            source,
        })?;
    }

    let contents = serde_json::to_vec_pretty(records)?;
    tokio::fs::write(path, contents).await.map_err(|source| Error::WriteFailed {
        path: path.to_string_lossy().to_string(),
        source,
    })?;

    tracing::info!(path = %path.display(), records = records.len(), "Snapshot written");
    Ok(())
}

pub async fn read_snapshot(path: &Path) -> Result<Vec<Record>, Error> {
    let contents = tokio::fs::read(path).await.map_err(|source| Error::ReadFailed {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    Ok(serde_json::from_slice(&contents)?)
}
