//! Local upload store
//!
//! The admin dashboard sends images as base64 data URLs. Files land under
//! `<root>/<bucket>/<folder>/<name>` and are served statically from
//! `/uploads`, which is the URL shape the storefront stores on listings.

use std::path::{Path, PathBuf};

use base64::Engine;
use thiserror::Error;
use uuid::Uuid;

use crate::models::StorageName;

/// URL prefix the router serves the upload root under
const PUBLIC_BASE: &str = "/uploads";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid file payload: {reason}")]
    InvalidDataUrl { reason: &'static str },

    #[error("file payload is empty")]
    EmptyFile,
}

/// Stored file location, as returned to the admin dashboard
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Public URL (`/uploads/<bucket>/<folder>/<name>`)
    pub url: String,
    /// Path relative to the upload root
    pub path: String,
}

/// Writes uploads beneath a single root directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write decoded file bytes under `<bucket>/<folder>/`.
    ///
    /// The stored name is prefixed with a fresh UUID so repeated uploads of
    /// the same file name never clobber each other.
    pub async fn save(
        &self,
        bucket: &StorageName,
        folder: &StorageName,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::EmptyFile);
        }

        let dir = self.root.join(bucket.as_str()).join(folder.as_str());
        tokio::fs::create_dir_all(&dir).await?;

        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name));
        tokio::fs::write(dir.join(&stored_name), bytes).await?;

        let path = format!("{}/{}/{}", bucket.as_str(), folder.as_str(), stored_name);
        Ok(StoredFile {
            url: format!("{PUBLIC_BASE}/{path}"),
            path,
        })
    }
}

/// Decode an upload payload: either a `data:<mime>;base64,<data>` URL or a
/// bare base64 string. Returns the declared mime type (if any) and bytes.
pub fn parse_data_url(input: &str) -> Result<(Option<String>, Vec<u8>), StorageError> {
    let (mime, payload) = match input.strip_prefix("data:") {
        Some(rest) => {
            let (head, data) = rest
                .split_once(',')
                .ok_or(StorageError::InvalidDataUrl {
                    reason: "missing ',' separator",
                })?;
            if !head.ends_with(";base64") {
                return Err(StorageError::InvalidDataUrl {
                    reason: "only base64 data URLs are supported",
                });
            }
            let mime = head.trim_end_matches(";base64");
            let mime = (!mime.is_empty()).then(|| mime.to_string());
            (mime, data)
        }
        None => (None, input),
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| StorageError::InvalidDataUrl {
            reason: "payload is not valid base64",
        })?;
    Ok((mime, bytes))
}

/// Strip anything path-like or shell-hostile from a client file name.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}
