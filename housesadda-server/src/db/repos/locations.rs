//! Location repository
//!
//! Area/city pairs, unique together. Listings resolve their `area` field
//! against this vocabulary before any insert.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// Location record from database
#[derive(Debug, Clone, FromRow)]
pub struct LocationRecord {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

/// Location repository
pub struct LocationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LocationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all locations, grouped by city.
    pub async fn list(&self) -> Result<Vec<LocationRecord>, DbError> {
        let rows = sqlx::query_as::<_, LocationRecord>(
            "SELECT id, name, city, created_at FROM locations ORDER BY city, name",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Look up a location by area name. Where the same area name exists in
    /// more than one city, the earliest row wins; the admin UI keeps names
    /// unique in practice.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<LocationRecord>, DbError> {
        let row = sqlx::query_as::<_, LocationRecord>(
            r#"
            SELECT id, name, city, created_at FROM locations
            WHERE name = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// Create a location, returning the existing row on conflict
    /// (idempotent on the name/city pair).
    pub async fn create(&self, name: &str, city: &str) -> Result<LocationRecord, DbError> {
        let row = sqlx::query_as::<_, LocationRecord>(
            r#"
            INSERT INTO locations (name, city) VALUES ($1, $2)
            ON CONFLICT (name, city) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, city, created_at
            "#,
        )
        .bind(name)
        .bind(city)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// Rename a location or move it to another city.
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        city: &str,
    ) -> Result<LocationRecord, DbError> {
        sqlx::query_as::<_, LocationRecord>(
            r#"
            UPDATE locations SET name = $2, city = $3 WHERE id = $1
            RETURNING id, name, city, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(city)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "location",
            id: id.to_string(),
        })
    }

    /// Delete a location. Fails with an FK violation while listings still
    /// reference it.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "location",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
