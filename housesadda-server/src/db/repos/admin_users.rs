//! Admin user repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// Admin user record from database
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin user repository
pub struct AdminUserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an admin by username. Returns None for unknown users; login
    /// folds that into the same failure as a wrong password.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, DbError> {
        let row = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM admin_users WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// Get an admin by id.
    pub async fn get(&self, id: Uuid) -> Result<AdminUser, DbError> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM admin_users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "admin user",
            id: id.to_string(),
        })
    }

    /// Create the admin account, or reset its password if the username
    /// already exists. Backs the `housesadda admin-init` command.
    pub async fn upsert(&self, username: &str, password_hash: &str) -> Result<AdminUser, DbError> {
        let row = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE
                SET password_hash = EXCLUDED.password_hash, updated_at = NOW()
            RETURNING id, username, password_hash, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// Change username and/or password hash. Absent fields keep their
    /// current value.
    pub async fn update_credentials(
        &self,
        id: Uuid,
        new_username: Option<&str>,
        new_password_hash: Option<&str>,
    ) -> Result<AdminUser, DbError> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            UPDATE admin_users
            SET username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(new_username)
        .bind(new_password_hash)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "admin user",
            id: id.to_string(),
        })
    }
}
