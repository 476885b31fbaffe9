//! HTML admin site for staff users

pub mod templates;
pub mod users;

use axum::{routing::get, Router};

use super::state::AppState;

pub use templates::load_templates;

/// Create the admin router, mounted at `/admin`
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/core/user/", get(users::list_users))
        .route("/core/user/add/", get(users::add_user_page).post(users::add_user))
        .route("/core/user/{id}/change/", get(users::change_user))
}
