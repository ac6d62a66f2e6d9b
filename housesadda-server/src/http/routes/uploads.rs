//! Upload endpoint
//!
//! Accepts the dashboard's base64 data-URL payload and writes it to the
//! local upload store. The returned URL is what gets saved on listings.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::AdminClaims;
use crate::http::server::AppState;
use crate::models::StorageName;
use crate::storage::parse_data_url;

fn default_bucket() -> String {
    "property-images".to_string()
}

fn default_folder() -> String {
    "general".to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// base64 data URL (or bare base64)
    pub file: String,
    pub file_name: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Declared content type; informational, the data URL wins
    pub content_type: Option<String>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub path: String,
}

/// POST /api/upload
async fn upload(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    Json(req): Json<UploadRequest>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let bucket = StorageName::new("bucket", &req.bucket)?;
    let folder = StorageName::new("folder", &req.folder)?;

    let (mime, bytes) = parse_data_url(&req.file)?;
    let content_type = mime.or(req.content_type);

    let stored = state
        .uploads
        .save(&bucket, &folder, &req.file_name, &bytes)
        .await?;
    tracing::info!(
        path = %stored.path,
        content_type = content_type.as_deref().unwrap_or("unknown"),
        size = bytes.len(),
        "file uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: stored.url,
            path: stored.path,
        }),
    ))
}

/// Upload routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/upload", post(upload))
}
