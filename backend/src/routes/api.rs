use axum::Json;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::core;
use crate::services::sheetdb;
use crate::services::snapshot;

#[derive(Deserialize)]
pub struct SaveDataRequest {
    pub data: Vec<snapshot::Record>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("SheetDB API call failed: {0}")]
    SheetDbCallFailed(#[from] sheetdb::Error),

    #[error("Data save failed: {0}")]
    SnapshotSaveFailed(#[from] snapshot::Error),

    #[error("API endpoint not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::SheetDbCallFailed(_) | Self::SnapshotSaveFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        };

        if status.is_server_error() {
            tracing::error!(
                error_type = %std::any::type_name::<Self>(),
                error_message = %self);
        } else {
            tracing::info!("{}", self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[allow(clippy::unused_async)]
pub async fn hello() -> impl IntoResponse {
    Json(json!({ "message": "Hello! This message comes from the backend." }))
}

/// Rows from the configured sheet, or fixture rows when none is configured
pub async fn sheet_data(
    State(context): State<core::ArcContext>,
    Query(query): Query<sheetdb::SheetQuery>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Fetching sheet data");
    let rows = sheetdb::fetch_sheet_data(&context.http_client, &context.settings.sheetdb, &query).await?;
    Ok(Json(rows))
}

/// Stores the posted rows as the latest snapshot, replacing the previous one
pub async fn save_data(
    State(context): State<core::ArcContext>,
    Json(request): Json<SaveDataRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(records = request.data.len(), "Saving data snapshot");
    snapshot::write_snapshot(&context.settings.storage.snapshot_path, &request.data).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Data saved as the latest snapshot."
    })))
}

#[allow(clippy::unused_async)]
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
