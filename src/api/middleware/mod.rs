//! API middleware components

pub mod admin_auth;
pub mod logging;
pub mod security;
pub mod user_auth;

pub use admin_auth::RequireStaff;
pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use security::{request_guard_middleware, security_headers_middleware, MAX_BODY_SIZE};
pub use user_auth::{extract_jwt_token, RequireUser, CREDENTIALS_NOT_PROVIDED};
