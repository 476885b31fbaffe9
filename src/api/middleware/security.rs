//! Security middleware for HTTP headers and request validation

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::types::ApiError;

/// Maximum request body size (10 MB), large enough for recipe images
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

const API_CSP: &str = "default-src 'none'; frame-ancestors 'none'";

const ADMIN_CSP: &str = "default-src 'self'; \
     style-src 'self' 'unsafe-inline'; \
     img-src 'self' data:; \
     frame-ancestors 'none'";

/// Middleware to add security headers to all responses
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let is_admin_path = request.uri().path().starts_with("/admin");
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    let csp = if is_admin_path { ADMIN_CSP } else { API_CSP };
    headers.insert(header::CONTENT_SECURITY_POLICY, HeaderValue::from_static(csp));

    if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate"),
        );
    }

    response
}

/// Reject requests whose path tries to escape its route
pub async fn request_guard_middleware(request: Request<Body>, next: Next) -> Response {
    if let Err(e) = validate_request_path(request.uri().path()) {
        return e.into_response();
    }

    next.run(request).await
}

/// Validate request path for common traversal tricks
pub fn validate_request_path(path: &str) -> Result<(), ApiError> {
    if path.contains("..") || path.contains("//") {
        return Err(ApiError::bad_request("Invalid path: path traversal detected"));
    }

    if path.contains('\0') {
        return Err(ApiError::bad_request("Invalid request: prohibited characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_request_path_ok() {
        assert!(validate_request_path("/api/recipe/recipes/").is_ok());
        assert!(validate_request_path("/media/uploads/recipe/a.jpg").is_ok());
    }

    #[test]
    fn test_validate_request_path_traversal() {
        assert!(validate_request_path("/media/../config/local.toml").is_err());
        assert!(validate_request_path("/api//user/me/").is_err());
    }

    #[test]
    fn test_validate_request_path_null_byte() {
        assert!(validate_request_path("/api/user/me\0/").is_err());
    }

    #[test]
    fn test_max_body_size() {
        assert_eq!(MAX_BODY_SIZE, 10 * 1024 * 1024);
    }
}
