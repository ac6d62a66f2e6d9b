//! Property repository
//!
//! Listing reads join the controlled vocabularies so the API can return
//! type and area names instead of ids. Multi-step writes (listing plus its
//! image rows) run in a single transaction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{PropertyDraft, PropertyFilter};

use super::DbError;

/// Columns shared by every listing read
const LISTING_SELECT: &str = r#"
SELECT
    p.id, p.title, p.type_id, t.name AS type_name,
    p.location_id, l.name AS location_name,
    p.city, p.price, p.bedrooms, p.bathrooms, p.sqft,
    p.description, p.transaction_type, p.is_featured, p.is_active,
    p.amenities, p.highlights, p.brochure_url, p.map_url, p.video_url,
    p.created_at, p.updated_at
FROM properties p
JOIN property_types t ON t.id = p.type_id
JOIN locations l ON l.id = p.location_id
"#;

/// Listing row with resolved vocabulary names
#[derive(Debug, Clone, FromRow)]
pub struct PropertyRow {
    pub id: Uuid,
    pub title: String,
    pub type_id: Uuid,
    pub type_name: String,
    pub location_id: Uuid,
    pub location_name: String,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image row for a listing, ordered by display_order
#[derive(Debug, Clone, FromRow)]
pub struct PropertyImage {
    pub id: Uuid,
    pub image_url: String,
    pub display_order: i32,
}

/// Listing with its ordered image collection
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub row: PropertyRow,
    pub images: Vec<PropertyImage>,
}

#[derive(Debug, Clone, FromRow)]
struct OwnedImage {
    property_id: Uuid,
    id: Uuid,
    image_url: String,
    display_order: i32,
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List listings matching a filter, newest first.
    ///
    /// Two queries total: one for the listings, one for every matched
    /// listing's images.
    pub async fn list(&self, filter: &PropertyFilter) -> Result<Vec<PropertyRecord>, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(LISTING_SELECT);
        qb.push("WHERE 1=1");
        filter.apply(&mut qb);
        qb.push(" ORDER BY p.created_at DESC");

        let rows: Vec<PropertyRow> = qb.build_query_as().fetch_all(self.pool).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut by_property = self.images_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let images = by_property.remove(&row.id).unwrap_or_default();
                PropertyRecord { row, images }
            })
            .collect())
    }

    /// Get a single listing with its images.
    pub async fn get(&self, id: Uuid) -> Result<PropertyRecord, DbError> {
        let mut qb = QueryBuilder::<Postgres>::new(LISTING_SELECT);
        qb.push("WHERE p.id = ").push_bind(id);

        let row: PropertyRow = qb
            .build_query_as()
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "property",
                id: id.to_string(),
            })?;

        let mut by_property = self.images_for(&[id]).await?;
        let images = by_property.remove(&id).unwrap_or_default();
        Ok(PropertyRecord { row, images })
    }

    /// Insert a listing and its image rows atomically.
    ///
    /// Type and location ids have already been resolved against the
    /// vocabularies by the caller.
    pub async fn create(
        &self,
        draft: &PropertyDraft,
        type_id: Uuid,
        location_id: Uuid,
        image_urls: &[String],
    ) -> Result<Uuid, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO properties (
                title, location_id, type_id, city, price,
                bedrooms, bathrooms, sqft, description, transaction_type,
                is_featured, is_active, amenities, highlights,
                brochure_url, map_url, video_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            "#,
        )
        .bind(draft.title.as_str())
        .bind(location_id)
        .bind(type_id)
        .bind(&draft.city)
        .bind(draft.price)
        .bind(draft.bedrooms)
        .bind(draft.bathrooms)
        .bind(draft.sqft)
        .bind(draft.description.as_deref())
        .bind(draft.transaction_type.as_str())
        .bind(draft.is_featured)
        .bind(draft.is_active)
        .bind(&draft.amenities)
        .bind(&draft.highlights)
        .bind(draft.brochure_url.as_deref())
        .bind(draft.map_url.as_deref())
        .bind(draft.video_url.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        insert_images(&mut tx, id, image_urls).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Rewrite a listing. When `image_urls` is Some, the image collection
    /// is replaced wholesale in the same transaction.
    pub async fn update(
        &self,
        id: Uuid,
        draft: &PropertyDraft,
        type_id: Uuid,
        location_id: Uuid,
        image_urls: Option<&[String]>,
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE properties SET
                title = $2, location_id = $3, type_id = $4, city = $5, price = $6,
                bedrooms = $7, bathrooms = $8, sqft = $9, description = $10,
                transaction_type = $11, is_featured = $12, is_active = $13,
                amenities = $14, highlights = $15,
                brochure_url = $16, map_url = $17, video_url = $18,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(draft.title.as_str())
        .bind(location_id)
        .bind(type_id)
        .bind(&draft.city)
        .bind(draft.price)
        .bind(draft.bedrooms)
        .bind(draft.bathrooms)
        .bind(draft.sqft)
        .bind(draft.description.as_deref())
        .bind(draft.transaction_type.as_str())
        .bind(draft.is_featured)
        .bind(draft.is_active)
        .bind(&draft.amenities)
        .bind(&draft.highlights)
        .bind(draft.brochure_url.as_deref())
        .bind(draft.map_url.as_deref())
        .bind(draft.video_url.as_deref())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "property",
                id: id.to_string(),
            });
        }

        if let Some(urls) = image_urls {
            sqlx::query("DELETE FROM property_images WHERE property_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_images(&mut tx, id, urls).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a listing. Image rows go with it via ON DELETE CASCADE.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "property",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Toggle the featured flag.
    pub async fn set_featured(&self, id: Uuid, is_featured: bool) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE properties SET is_featured = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(is_featured)
        .execute(self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "property",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn images_for(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<PropertyImage>>, DbError> {
        let rows = sqlx::query_as::<_, OwnedImage>(
            r#"
            SELECT property_id, id, image_url, display_order
            FROM property_images
            WHERE property_id = ANY($1)
            ORDER BY property_id, display_order, id
            "#,
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_property: HashMap<Uuid, Vec<PropertyImage>> = HashMap::new();
        for row in rows {
            by_property
                .entry(row.property_id)
                .or_default()
                .push(PropertyImage {
                    id: row.id,
                    image_url: row.image_url,
                    display_order: row.display_order,
                });
        }
        Ok(by_property)
    }
}

async fn insert_images(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    property_id: Uuid,
    image_urls: &[String],
) -> Result<(), DbError> {
    for (order, url) in image_urls.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO property_images (property_id, image_url, display_order)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(property_id)
        .bind(url)
        .bind(order as i32)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_rolls_back_on_image_failure() {
        // If an image insert fails, the listing row should NOT exist.
    }
}
