//! Template rendering for the admin site
//!
//! Templates are compiled into the binary and rendered with Tera. Their
//! names end in `.html`, so Tera escapes every interpolated value.

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::api::types::ApiError;
use crate::domain::user::User;

pub const SITE_TITLE: &str = "Recipe App site admin";
pub const SITE_HEADER: &str = "Recipe App administration";

pub const USER_LIST: &str = "admin/user_list.html";
pub const USER_CHANGE: &str = "admin/user_change.html";
pub const USER_ADD: &str = "admin/user_add.html";

/// Build the Tera instance holding every admin template
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();

    tera.add_raw_templates(vec![
        ("admin/base.html", include_str!("../../../templates/admin/base.html")),
        (USER_LIST, include_str!("../../../templates/admin/user_list.html")),
        (USER_CHANGE, include_str!("../../../templates/admin/user_change.html")),
        (USER_ADD, include_str!("../../../templates/admin/user_add.html")),
    ])?;

    Ok(tera)
}

/// A user as shown on admin pages
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            is_active: user.is_active(),
            is_staff: user.is_staff(),
            is_superuser: user.is_superuser(),
            created_at: user.created_at().format("%Y-%m-%d %H:%M").to_string(),
            updated_at: user.updated_at().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Context shared by every admin page
pub fn base_context(current_user: &User) -> Context {
    let mut context = Context::new();
    context.insert("site_title", SITE_TITLE);
    context.insert("site_header", SITE_HEADER);
    context.insert("current_user", current_user.email());
    context
}

pub fn render(tera: &Tera, template: &str, context: &Context) -> Result<Html<String>, ApiError> {
    tera.render(template, context).map(Html).map_err(|e| {
        tracing::error!(template, error = %e, "Failed to render admin template");
        ApiError::internal("Internal server error")
    })
}
