//! Request and response types of the REST API

pub mod attribute;
pub mod error;
pub mod json;
pub mod recipe;
pub mod user;

pub use attribute::{AttributeListQuery, AttributePatchRequest, AttributeRequest, AttributeResponse};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::{Json, ValidatedJson};
pub use recipe::{
    RecipeDetailResponse, RecipeImageResponse, RecipeListQuery, RecipePatchRequest, RecipeRequest,
    RecipeResponse,
};
pub use user::{
    CreateUserApiRequest, TokenRequest, TokenResponse, UpdateProfileApiRequest, UserResponse,
};
