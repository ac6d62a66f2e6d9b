//! Property type vocabulary endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::repos::{PropertyTypeRecord, PropertyTypeRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AdminClaims, ValidUuid};
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Maximum length for type names
const MAX_NAME_LEN: usize = 80;

#[derive(Deserialize)]
pub struct PropertyTypePayload {
    pub name: String,
}

impl PropertyTypePayload {
    fn validated(&self) -> Result<&str, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }
        Ok(name)
    }
}

#[derive(Serialize)]
pub struct PropertyTypeResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<PropertyTypeRecord> for PropertyTypeResponse {
    fn from(record: PropertyTypeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

/// Resolve a type name to its id, or fail the request with 400. Listing
/// writes call this so no insert happens for an unknown type.
pub(super) async fn resolve_type(pool: &PgPool, name: &str) -> Result<Uuid, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty { field: "type" }.into());
    }
    let record = PropertyTypeRepo::new(pool)
        .find_by_name(name)
        .await?
        .ok_or_else(|| ApiError::bad_request(format!("unknown property type '{name}'")))?;
    Ok(record.id)
}

/// GET /api/types
async fn list_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PropertyTypeResponse>>, ApiError> {
    let rows = PropertyTypeRepo::new(&state.pool).list().await?;
    Ok(Json(rows.into_iter().map(PropertyTypeResponse::from).collect()))
}

/// POST /api/types
async fn create_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    Json(payload): Json<PropertyTypePayload>,
) -> Result<(StatusCode, Json<PropertyTypeResponse>), ApiError> {
    let name = payload.validated()?;
    let row = PropertyTypeRepo::new(&state.pool).create(name).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// PUT /api/types/{id}
async fn update_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    ValidUuid(id): ValidUuid,
    Json(payload): Json<PropertyTypePayload>,
) -> Result<Json<PropertyTypeResponse>, ApiError> {
    let name = payload.validated()?;
    let row = PropertyTypeRepo::new(&state.pool).update(id, name).await?;
    Ok(Json(row.into()))
}

/// DELETE /api/types/{id}
async fn delete_type(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    PropertyTypeRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Property type routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/types", get(list_types).post(create_type))
        .route(
            "/types/{id}",
            axum::routing::put(update_type).delete(delete_type),
        )
}
