//! Location (area) vocabulary endpoints

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

use crate::db::repos::{LocationRecord, LocationRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AdminClaims, ValidUuid};
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Maximum length for area and city names
const MAX_NAME_LEN: usize = 120;

#[derive(Deserialize)]
pub struct LocationPayload {
    pub name: String,
    pub city: String,
}

impl LocationPayload {
    fn validated(&self) -> Result<(&str, &str), ValidationError> {
        let name = self.name.trim();
        let city = self.city.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if city.is_empty() {
            return Err(ValidationError::Empty { field: "city" });
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LEN,
            });
        }
        if city.len() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "city",
                max: MAX_NAME_LEN,
            });
        }
        Ok((name, city))
    }
}

#[derive(Serialize)]
pub struct LocationResponse {
    pub id: Uuid,
    pub name: String,
    pub city: String,
}

impl From<LocationRecord> for LocationResponse {
    fn from(record: LocationRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            city: record.city,
        }
    }
}

/// Resolve an area name to its location id, or fail the request with 400.
/// Listing writes call this so no insert happens for an unknown area.
pub(super) async fn resolve_area(pool: &PgPool, area: &str) -> Result<Uuid, ApiError> {
    let area = area.trim();
    if area.is_empty() {
        return Err(ValidationError::Empty { field: "area" }.into());
    }
    let location = LocationRepo::new(pool)
        .find_by_name(area)
        .await?
        .ok_or_else(|| ApiError::bad_request(format!("unknown area '{area}'")))?;
    Ok(location.id)
}

/// GET /api/locations
async fn list_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocationResponse>>, ApiError> {
    let rows = LocationRepo::new(&state.pool).list().await?;
    Ok(Json(rows.into_iter().map(LocationResponse::from).collect()))
}

/// POST /api/locations
async fn create_location(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    Json(payload): Json<LocationPayload>,
) -> Result<(StatusCode, Json<LocationResponse>), ApiError> {
    let (name, city) = payload.validated()?;
    let row = LocationRepo::new(&state.pool).create(name, city).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// PUT /api/locations/{id}
async fn update_location(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    ValidUuid(id): ValidUuid,
    Json(payload): Json<LocationPayload>,
) -> Result<Json<LocationResponse>, ApiError> {
    let (name, city) = payload.validated()?;
    let row = LocationRepo::new(&state.pool).update(id, name, city).await?;
    Ok(Json(row.into()))
}

/// DELETE /api/locations/{id}
async fn delete_location(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    LocationRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Location routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/{id}",
            axum::routing::put(update_location).delete(delete_location),
        )
}
