//! Bearer token authentication for the REST API

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

pub const CREDENTIALS_NOT_PROVIDED: &str = "Authentication credentials were not provided.";

/// Extractor that requires an active user identified by a JWT
///
/// The token is read from `Authorization: Bearer <jwt>`.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_jwt_token(&parts.headers)?;
        let user = authenticate_token(&token, state).await?;

        Ok(RequireUser(user))
    }
}

/// Resolve a token to its active user
pub async fn authenticate_token(token: &str, state: &AppState) -> Result<User, ApiError> {
    let claims = state.jwt_service.validate(token).map_err(|e| {
        debug!(error = %e, "Rejected JWT");
        ApiError::unauthorized("Invalid token.")
    })?;

    let user_id = claims
        .user_id()
        .map_err(|_| ApiError::unauthorized("Invalid token."))?;

    let user = state
        .user_service
        .get(&user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found."))?;

    if !user.is_active() {
        debug!(user_id = %user.id(), "Rejected token of inactive user");
        return Err(ApiError::unauthorized("User inactive or deleted."));
    }

    Ok(user)
}

/// Extract JWT token from Authorization header
pub fn extract_jwt_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    match token {
        Some(token) => Ok(token.to_string()),
        None => Err(ApiError::unauthorized(CREDENTIALS_NOT_PROVIDED)),
    }
}
