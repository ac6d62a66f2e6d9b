//! Listing endpoints
//!
//! Reads are public and filterable; writes require an admin token and
//! resolve the `type`/`area` names against the controlled vocabularies
//! before touching the properties table.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::db::repos::{PropertyRecord, PropertyRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AdminClaims, ValidUuid};
use crate::http::server::AppState;
use crate::models::{PropertyDraft, PropertyFilter, PropertyQueryParams};

use super::{locations::resolve_area, property_types::resolve_type};

fn default_active() -> bool {
    true
}

/// Listing create/update payload, as sent by the admin dashboard
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPayload {
    pub title: String,
    /// Property type name; must exist in the vocabulary
    #[serde(rename = "type")]
    pub property_type: String,
    /// Area (location) name; must exist in the vocabulary
    pub area: String,
    pub city: String,
    pub price: i64,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    #[serde(default)]
    pub sqft: i32,
    pub description: Option<String>,
    pub transaction_type: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    pub brochure_url: Option<String>,
    pub map_url: Option<String>,
    pub video_url: Option<String>,
    /// Image URLs in display order; on update, replaces the collection
    pub images: Option<Vec<String>>,
}

impl PropertyPayload {
    fn to_draft(&self) -> Result<PropertyDraft, ApiError> {
        let draft = PropertyDraft::new(
            &self.title,
            &self.city,
            self.price,
            self.bedrooms,
            self.bathrooms,
            self.sqft,
            self.description.clone(),
            &self.transaction_type,
            self.is_featured,
            self.is_active,
            self.amenities.clone(),
            self.highlights.clone(),
            self.brochure_url.clone(),
            self.map_url.clone(),
            self.video_url.clone(),
        )?;
        Ok(draft)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImageView {
    pub id: Uuid,
    pub image_url: String,
    pub display_order: i32,
}

/// Listing view model returned to both storefront and dashboard
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub area: String,
    pub city: String,
    pub price: i64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub sqft: i32,
    pub description: Option<String>,
    pub transaction_type: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub amenities: Value,
    pub highlights: Value,
    pub brochure_url: Option<String>,
    pub map_url: Option<String>,
    pub video_url: Option<String>,
    /// First image by display order
    pub cover_image: Option<String>,
    pub images: Vec<PropertyImageView>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PropertyRecord> for PropertyResponse {
    fn from(record: PropertyRecord) -> Self {
        let row = record.row;
        let images: Vec<PropertyImageView> = record
            .images
            .into_iter()
            .map(|i| PropertyImageView {
                id: i.id,
                image_url: i.image_url,
                display_order: i.display_order,
            })
            .collect();

        Self {
            id: row.id,
            title: row.title,
            property_type: row.type_name,
            area: row.location_name,
            city: row.city,
            price: row.price,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            sqft: row.sqft,
            description: row.description,
            transaction_type: row.transaction_type,
            is_featured: row.is_featured,
            is_active: row.is_active,
            amenities: row.amenities,
            highlights: row.highlights,
            brochure_url: row.brochure_url,
            map_url: row.map_url,
            video_url: row.video_url,
            cover_image: images.first().map(|i| i.image_url.clone()),
            images,
            created_at: row.created_at.to_rfc3339(),
            updated_at: row.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedPayload {
    pub is_featured: bool,
}

/// GET /api/properties
async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PropertyQueryParams>,
) -> Result<Json<Vec<PropertyResponse>>, ApiError> {
    let filter = PropertyFilter::from(params);
    let records = PropertyRepo::new(&state.pool).list(&filter).await?;
    Ok(Json(records.into_iter().map(PropertyResponse::from).collect()))
}

/// GET /api/properties/{id}
async fn get_property(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<PropertyResponse>, ApiError> {
    let record = PropertyRepo::new(&state.pool).get(id).await?;
    Ok(Json(record.into()))
}

/// POST /api/properties
async fn create_property(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    Json(payload): Json<PropertyPayload>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let draft = payload.to_draft()?;
    let type_id = resolve_type(&state.pool, &payload.property_type).await?;
    let location_id = resolve_area(&state.pool, &payload.area).await?;

    let images = payload.images.unwrap_or_default();
    let id = PropertyRepo::new(&state.pool)
        .create(&draft, type_id, location_id, &images)
        .await?;
    tracing::info!(%id, title = %draft.title.as_str(), "listing created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/properties/{id}
async fn update_property(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    ValidUuid(id): ValidUuid,
    Json(payload): Json<PropertyPayload>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let draft = payload.to_draft()?;
    let type_id = resolve_type(&state.pool, &payload.property_type).await?;
    let location_id = resolve_area(&state.pool, &payload.area).await?;

    let repo = PropertyRepo::new(&state.pool);
    repo.update(id, &draft, type_id, location_id, payload.images.as_deref())
        .await?;

    let record = repo.get(id).await?;
    Ok(Json(record.into()))
}

/// DELETE /api/properties/{id}
async fn delete_property(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    PropertyRepo::new(&state.pool).delete(id).await?;
    tracing::info!(%id, "listing deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/properties/{id}/featured
async fn set_featured(
    State(state): State<Arc<AppState>>,
    _admin: AdminClaims,
    ValidUuid(id): ValidUuid,
    Json(payload): Json<FeaturedPayload>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let repo = PropertyRepo::new(&state.pool);
    repo.set_featured(id, payload.is_featured).await?;
    let record = repo.get(id).await?;
    Ok(Json(record.into()))
}

/// Listing routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route(
            "/properties/{id}",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/properties/{id}/featured", patch(set_featured))
}
