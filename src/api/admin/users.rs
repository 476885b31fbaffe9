//! User administration pages

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::templates::{base_context, render, UserRow, USER_ADD, USER_CHANGE, USER_LIST};
use crate::api::middleware::RequireStaff;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::user::CreateUserRequest;

/// Submitted add-user form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddUserForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

/// GET /admin/core/user/
pub async fn list_users(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
) -> Result<Html<String>, ApiError> {
    let users = state.user_service.list().await?;
    debug!(count = users.len(), "Admin listing users");

    let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();

    let mut context = base_context(&staff);
    context.insert("users", &rows);

    render(&state.templates, USER_LIST, &context)
}

/// GET /admin/core/user/{id}/change/
pub async fn change_user(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let not_found = || ApiError::not_found(format!("User '{}' not found", id));

    let user_id = UserId::parse(&id).map_err(|_| not_found())?;
    let user = state
        .user_service
        .get(&user_id)
        .await?
        .ok_or_else(not_found)?;

    let mut context = base_context(&staff);
    context.insert("user", &UserRow::from(&user));

    render(&state.templates, USER_CHANGE, &context)
}

/// GET /admin/core/user/add/
pub async fn add_user_page(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
) -> Result<Html<String>, ApiError> {
    render_add_page(&state, &staff, &AddUserForm::default(), None)
}

/// POST /admin/core/user/add/
pub async fn add_user(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Form(form): Form<AddUserForm>,
) -> Result<Response, ApiError> {
    if form.password1 != form.password2 {
        let page = render_add_page(
            &state,
            &staff,
            &form,
            Some("The two password fields didn't match."),
        )?;
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let request =
        CreateUserRequest::new(form.email.clone(), form.password1.clone()).with_name(form.name.clone());

    match state.user_service.create_user(request).await {
        Ok(user) => {
            info!(user_id = %user.id(), created_by = %staff.id(), "Admin created user");
            Ok(Redirect::to(&format!("/admin/core/user/{}/change/", user.id())).into_response())
        }
        Err(e @ (DomainError::Validation { .. } | DomainError::Conflict { .. })) => {
            let message = ApiError::from(e).response.error.message;
            let page = render_add_page(&state, &staff, &form, Some(&message))?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn render_add_page(
    state: &AppState,
    staff: &crate::domain::user::User,
    form: &AddUserForm,
    error: Option<&str>,
) -> Result<Html<String>, ApiError> {
    let mut context = base_context(staff);
    context.insert("email", &form.email);
    context.insert("name", &form.name);
    context.insert("error", &error);

    render(&state.templates, USER_ADD, &context)
}
