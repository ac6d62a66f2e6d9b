//! Admin auth endpoints: login, token verify, credential update

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use housesadda_core::{hash_password, verify_password};

use crate::db::repos::{AdminUser, AdminUserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::AdminClaims;
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Maximum length for admin usernames
const MAX_USERNAME_LEN: usize = 64;

/// One message for unknown-user and wrong-password so the response never
/// reveals whether a username exists.
const BAD_CREDENTIALS: &str = "invalid username or password";

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
}

impl From<AdminUser> for UserView {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub user: UserView,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialsRequest {
    pub current_password: String,
    pub new_username: Option<String>,
    pub new_password: Option<String>,
}

/// POST /api/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ValidationError::Empty { field: "username" }.into());
    }
    if req.password.is_empty() {
        return Err(ValidationError::Empty { field: "password" }.into());
    }

    let user = AdminUserRepo::new(&state.pool)
        .find_by_username(username)
        .await?
        .ok_or(ApiError::Unauthorized {
            message: BAD_CREDENTIALS,
        })?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized {
            message: BAD_CREDENTIALS,
        });
    }

    let token = state.jwt.issue(user.id, &user.username)?;
    tracing::info!(username = %user.username, "admin logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/auth/verify
async fn verify(AdminClaims(claims): AdminClaims) -> Result<Json<VerifyResponse>, ApiError> {
    let id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized {
        message: "invalid token",
    })?;

    Ok(Json(VerifyResponse {
        user: UserView {
            id,
            username: claims.username,
        },
    }))
}

/// PUT /api/auth/update-credentials
async fn update_credentials(
    State(state): State<Arc<AppState>>,
    AdminClaims(claims): AdminClaims,
    Json(req): Json<UpdateCredentialsRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let new_username = req
        .new_username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    let new_password = req.new_password.as_deref().filter(|p| !p.is_empty());

    if new_username.is_none() && new_password.is_none() {
        return Err(ApiError::bad_request("nothing to update"));
    }
    if let Some(username) = new_username {
        if username.len() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "newUsername",
                max: MAX_USERNAME_LEN,
            }
            .into());
        }
    }

    let id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized {
        message: "invalid token",
    })?;

    let repo = AdminUserRepo::new(&state.pool);
    let user = repo.get(id).await?;

    if !verify_password(&req.current_password, &user.password_hash)? {
        return Err(ApiError::Unauthorized {
            message: "current password is incorrect",
        });
    }

    let new_hash = match new_password {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let updated = repo
        .update_credentials(id, new_username, new_hash.as_deref())
        .await?;
    tracing::info!(username = %updated.username, "admin credentials updated");

    Ok(Json(VerifyResponse {
        user: updated.into(),
    }))
}

/// Auth routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/verify", get(verify))
        .route("/auth/update-credentials", put(update_credentials))
}
