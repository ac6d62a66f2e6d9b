//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::{FromRequestParts, Path};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use housesadda_core::Claims;

use super::error::ApiError;
use super::server::AppState;
use crate::models::ValidationError;

/// Verified admin identity, extracted from the bearer token.
///
/// Every mutating route takes this; a missing or bad token rejects the
/// request with 401 before the handler body runs.
pub struct AdminClaims(pub Claims);

impl FromRequestParts<Arc<AppState>> for AdminClaims {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(ApiError::Unauthorized {
                message: "missing authorization header",
            })?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized {
                message: "authorization header must be 'Bearer <token>'",
            })?;

        let claims = state.jwt.verify(token)?;
        Ok(Self(claims))
    }
}

/// Extract and validate a UUID path parameter, with our error shape
/// instead of axum's plain-text rejection.
pub struct ValidUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidUuid
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let uuid = Uuid::parse_str(&id).map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "invalid UUID format",
            })
        })?;

        Ok(Self(uuid))
    }
}
