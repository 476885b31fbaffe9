use axum::{extract::DefaultBodyLimit, http::HeaderName, middleware, routing::get, Router};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use super::admin;
use super::health;
use super::middleware::{
    logging_middleware, request_guard_middleware, security_headers_middleware, MAX_BODY_SIZE,
    REQUEST_ID_HEADER,
};
use super::recipe;
use super::state::AppState;
use super::user;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    let media_path = state.media.url_prefix.trim_end_matches('/').to_string();
    let media_root = state.media.root.clone();
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // REST API
        .nest("/api/user", user::create_user_router())
        .nest("/api/recipe", recipe::create_recipe_api_router())
        // HTML admin site
        .nest("/admin", admin::create_admin_router())
        .with_state(state);

    if media_path.is_empty() {
        warn!("Media URL prefix is '/', uploaded media will not be served");
    } else {
        router = router.nest_service(&media_path, ServeDir::new(media_root));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_guard_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}
