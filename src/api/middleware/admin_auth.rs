//! Staff authentication for the admin site

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use super::user_auth::RequireUser;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Extractor that requires an authenticated user with `is_staff`
///
/// Missing or invalid credentials are rejected with 401, a valid
/// non-staff user with 403.
#[derive(Debug, Clone)]
pub struct RequireStaff(pub User);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireUser(user) = RequireUser::from_request_parts(parts, state).await?;

        if !user.is_staff() {
            debug!(user_id = %user.id(), "Admin access denied to non-staff user");
            return Err(ApiError::forbidden(
                "You do not have permission to perform this action.",
            ));
        }

        debug!(user_id = %user.id(), "Admin access granted");
        Ok(RequireStaff(user))
    }
}
