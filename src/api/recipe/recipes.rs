//! Recipe endpoints

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::debug;

use super::parse_path_id;
use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, Json, RecipeDetailResponse, RecipeImageResponse, RecipeListQuery,
    RecipePatchRequest, RecipeRequest, RecipeResponse, ValidatedJson,
};
use crate::domain::id::EntityId;
use crate::domain::recipe::RecipeId;
use crate::infrastructure::recipe::ImageUpload;

/// Multipart field carrying the uploaded image
pub const IMAGE_FIELD: &str = "image";

/// Recipe routes, relative to `/api/recipe`
pub fn create_recipe_router() -> Router<AppState> {
    Router::new()
        .route("/recipes/", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/{id}/",
            get(get_recipe)
                .put(replace_recipe)
                .patch(patch_recipe)
                .delete(delete_recipe),
        )
        .route("/recipes/{id}/upload-image/", post(upload_image))
}

fn recipe_id(id: &str) -> Result<RecipeId, ApiError> {
    parse_path_id("Recipe", id).map(RecipeId::from_uuid)
}

/// GET /api/recipe/recipes/
pub async fn list_recipes(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(query): Query<RecipeListQuery>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let filter = query.to_filter()?;
    let recipes = state.recipe_service.list(user.id(), &filter).await?;

    Ok(Json(recipes.iter().map(RecipeResponse::from).collect()))
}

/// POST /api/recipe/recipes/
pub async fn create_recipe(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ValidatedJson(request): ValidatedJson<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let recipe = state.recipe_service.create(user.id(), request.into()).await?;

    Ok((StatusCode::CREATED, Json(RecipeResponse::from(&recipe))))
}

/// GET /api/recipe/recipes/{id}/
pub async fn get_recipe(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let detail = state.recipe_service.detail(user.id(), &recipe_id(&id)?).await?;
    let image = state.recipe_service.image_url(&detail.recipe);

    Ok(Json(RecipeDetailResponse::new(&detail, image)))
}

/// PUT /api/recipe/recipes/{id}/
pub async fn replace_recipe(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = state
        .recipe_service
        .update(user.id(), &recipe_id(&id)?, request.into())
        .await?;

    Ok(Json(RecipeResponse::from(&recipe)))
}

/// PATCH /api/recipe/recipes/{id}/
pub async fn patch_recipe(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RecipePatchRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = state
        .recipe_service
        .update(user.id(), &recipe_id(&id)?, request.into())
        .await?;

    Ok(Json(RecipeResponse::from(&recipe)))
}

/// DELETE /api/recipe/recipes/{id}/
pub async fn delete_recipe(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.recipe_service.delete(user.id(), &recipe_id(&id)?).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Upload or replace the recipe's image
///
/// POST /api/recipe/recipes/{id}/upload-image/
pub async fn upload_image(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RecipeImageResponse>, ApiError> {
    let id = recipe_id(&id)?;

    // Resolve ownership before reading the body so foreign ids report 404
    state.recipe_service.get(user.id(), &id).await?;

    let mut multipart = multipart.map_err(|e| {
        ApiError::bad_request(format!("Invalid multipart request: {}", e.body_text()))
    })?;

    let upload = read_image_field(&mut multipart).await?;
    debug!(recipe_id = %id, filename = %upload.filename, size = upload.data.len(), "Received image");

    let recipe = state.recipe_service.upload_image(user.id(), &id, upload).await?;

    Ok(Json(RecipeImageResponse {
        id: recipe.id().as_uuid(),
        image: state.recipe_service.image_url(&recipe),
    }))
}

async fn read_image_field(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e.body_text())))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e.body_text())))?;

        if filename.is_empty() {
            return Err(ApiError::bad_request(
                "The submitted data was not a file. Check the encoding type on the form.",
            )
            .with_param(IMAGE_FIELD));
        }

        return Ok(ImageUpload {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(ApiError::bad_request("No file was submitted.").with_param(IMAGE_FIELD))
}
