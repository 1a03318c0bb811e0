//! Authentication middleware
//!
//! Provides an Axum extractor that resolves caller identity from the
//! session token before any handler logic runs.
//!
//! The token is accepted from the `token` cookie or an
//! `Authorization: Bearer <token>` header, cookie taking precedence when
//! both are present. Verification uses the pre-computed keys from
//! AppState and performs no I/O.

use crate::auth::{cookie, TokenError};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// Authenticated caller identity resolved from a verified session token
///
/// Produced once per request and passed explicitly to handlers; identity
/// reflects the account as of token issuance.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub email: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Cookie first, then Authorization header
        let token = cookie::session_cookie_value(&parts.headers)
            .or_else(|| bearer_token(parts))
            .ok_or_else(|| ApiError::Unauthorized("Missing session token".to_string()))?;

        let claims = app_state.tokens().verify(&token).map_err(|e| match e {
            TokenError::Expired => ApiError::Unauthorized("Session expired".to_string()),
            TokenError::Invalid => ApiError::Unauthorized("Invalid session token".to_string()),
        })?;

        let account_id = claims
            .account_id()
            .map_err(|_| ApiError::Unauthorized("Invalid account ID in token".to_string()))?;

        Ok(AuthUser {
            account_id,
            email: claims.email,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}
