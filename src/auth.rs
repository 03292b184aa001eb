//! Bearer-token validation.
//!
//! Token issuance lives in a separate identity service; this module only
//! verifies inbound tokens and exposes the caller's id to handlers. Checkout
//! accepts anonymous callers, so it uses [`MaybeAuthUser`]; admin mutations
//! require [`AdminUser`].

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: usize,
}

/// Verified caller identity, or `None` when no Authorization header was sent.
/// A header that is present but invalid is a 401, never a silent `None`.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<Uuid>);

/// Verified caller with the `admin` role.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub Uuid);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn verify(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("invalid token: {e}")))
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            None => Ok(Self(None)),
            Some(token) => {
                let claims = verify(token, &state.config.jwt_secret)?;
                Ok(Self(Some(claims.sub)))
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;
        let claims = verify(token, &state.config.jwt_secret)?;
        if claims.role != "admin" {
            return Err(AppError::Forbidden);
        }
        Ok(Self(claims.sub))
    }
}
