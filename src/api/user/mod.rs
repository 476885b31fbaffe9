//! User account endpoints
//!
//! Registration, token issuing and the signed-in user's own profile.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateUserApiRequest, Json, TokenRequest, TokenResponse, UpdateProfileApiRequest,
    UserResponse, ValidatedJson,
};

const INVALID_CREDENTIALS: &str = "Unable to authenticate with provided credentials.";

/// Create the user router, mounted at `/api/user`
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/create/", post(create_user))
        .route("/token/", post(create_token))
        .route("/me/", get(get_me).patch(update_me).put(update_me))
}

/// Register a new user
///
/// POST /api/user/create/
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state.user_service.create_user(request.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Exchange email and password for a JWT
///
/// POST /api/user/token/
pub async fn create_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::bad_request(INVALID_CREDENTIALS).with_code("authorization"))?;

    let token = state.jwt_service.generate(&user)?;
    debug!(user_id = %user.id(), "Issued token");

    Ok(Json(TokenResponse { token }))
}

/// GET /api/user/me/
pub async fn get_me(RequireUser(user): RequireUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// Update the signed-in user's name and/or password
///
/// PATCH /api/user/me/
pub async fn update_me(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .update_profile(user.id(), request.into())
        .await?;

    Ok(Json(UserResponse::from(&user)))
}
