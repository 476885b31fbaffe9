//! Tag and ingredient endpoints
//!
//! Both collections expose the same routes, so the handlers are generic over
//! the attribute type and pick their service from the state.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Router,
};
use tracing::debug;

use super::parse_path_id;
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, AttributeListQuery, AttributePatchRequest, AttributeRequest, AttributeResponse,
    Json, ValidatedJson,
};
use crate::domain::attribute::RecipeAttribute;
use crate::domain::id::EntityId;
use crate::domain::ingredient::Ingredient;
use crate::domain::tag::Tag;
use crate::infrastructure::attribute::AttributeService;

/// An attribute type that has its own collection in the API
pub trait AttributeEndpoint: RecipeAttribute {
    /// Path segment of the collection under `/api/recipe`
    const COLLECTION: &'static str;

    fn service(state: &AppState) -> &AttributeService<Self>;
}

impl AttributeEndpoint for Tag {
    const COLLECTION: &'static str = "tags";

    fn service(state: &AppState) -> &AttributeService<Self> {
        &state.tag_service
    }
}

impl AttributeEndpoint for Ingredient {
    const COLLECTION: &'static str = "ingredients";

    fn service(state: &AppState) -> &AttributeService<Self> {
        &state.ingredient_service
    }
}

/// Routes of one attribute collection
pub fn create_attribute_router<A: AttributeEndpoint>() -> Router<AppState> {
    Router::new()
        .route(
            &format!("/{}/", A::COLLECTION),
            get(list_attributes::<A>).post(create_attribute::<A>),
        )
        .route(
            &format!("/{}/{{id}}/", A::COLLECTION),
            get(get_attribute::<A>)
                .put(replace_attribute::<A>)
                .patch(patch_attribute::<A>)
                .delete(delete_attribute::<A>),
        )
}

/// GET /api/recipe/{collection}/
pub async fn list_attributes<A: AttributeEndpoint>(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<AttributeListQuery>,
) -> Result<Json<Vec<AttributeResponse>>, ApiError> {
    let assigned_only = query.assigned_only()?;

    let attributes = A::service(&state).list(user.id(), assigned_only).await?;

    Ok(Json(
        attributes.iter().map(AttributeResponse::from_attribute).collect(),
    ))
}

/// POST /api/recipe/{collection}/
pub async fn create_attribute<A: AttributeEndpoint>(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ValidatedJson(request): ValidatedJson<AttributeRequest>,
) -> Result<(StatusCode, Json<AttributeResponse>), ApiError> {
    let attribute = A::service(&state).create(user.id(), &request.name).await?;

    debug!(kind = %A::KIND, id = %attribute.id(), "Created attribute");

    Ok((
        StatusCode::CREATED,
        Json(AttributeResponse::from_attribute(&attribute)),
    ))
}

/// GET /api/recipe/{collection}/{id}/
pub async fn get_attribute<A: AttributeEndpoint>(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<AttributeResponse>, ApiError> {
    let id = A::Id::from_uuid(parse_path_id(A::KIND.label(), &id)?);
    let attribute = A::service(&state).get(user.id(), &id).await?;

    Ok(Json(AttributeResponse::from_attribute(&attribute)))
}

/// PUT /api/recipe/{collection}/{id}/
pub async fn replace_attribute<A: AttributeEndpoint>(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AttributeRequest>,
) -> Result<Json<AttributeResponse>, ApiError> {
    let id = A::Id::from_uuid(parse_path_id(A::KIND.label(), &id)?);
    let attribute = A::service(&state)
        .rename(user.id(), &id, &request.name)
        .await?;

    Ok(Json(AttributeResponse::from_attribute(&attribute)))
}

/// PATCH /api/recipe/{collection}/{id}/
pub async fn patch_attribute<A: AttributeEndpoint>(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AttributePatchRequest>,
) -> Result<Json<AttributeResponse>, ApiError> {
    let service = A::service(&state);
    let id = A::Id::from_uuid(parse_path_id(A::KIND.label(), &id)?);

    let attribute = match request.name {
        Some(name) => service.rename(user.id(), &id, &name).await?,
        None => service.get(user.id(), &id).await?,
    };

    Ok(Json(AttributeResponse::from_attribute(&attribute)))
}

/// DELETE /api/recipe/{collection}/{id}/
pub async fn delete_attribute<A: AttributeEndpoint>(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = A::Id::from_uuid(parse_path_id(A::KIND.label(), &id)?);
    A::service(&state).delete(user.id(), &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
