//! Admin site tests

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};

use common::{TestApp, PASSWORD};

const USER_LIST_URL: &str = "/admin/core/user/";
const USER_ADD_URL: &str = "/admin/core/user/add/";

async fn staff_token(app: &TestApp) -> String {
    app.create_superuser("admin@example.com").await;
    app.token_for("admin@example.com").await
}

async fn post_form(app: &TestApp, token: &str, body: &str) -> common::TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(USER_ADD_URL)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.send(request).await
}

#[tokio::test]
async fn test_users_listed() {
    let app = TestApp::new();
    let token = staff_token(&app).await;
    app.create_user("user@example.com", "Test User").await;

    let response = app.get(USER_LIST_URL, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = response.text();
    assert!(body.contains("Test User"));
    assert!(body.contains("user@example.com"));
    assert!(body.contains("admin@example.com"));
}

#[tokio::test]
async fn test_admin_requires_authentication() {
    let app = TestApp::new();

    let response = app.get(USER_LIST_URL, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_forbidden_for_regular_user() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let response = app.get(USER_LIST_URL, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["error"]["type"], "permission_error");
}

#[tokio::test]
async fn test_edit_user_page() {
    let app = TestApp::new();
    let token = staff_token(&app).await;
    let user = app.create_user("user@example.com", "Test User").await;

    let response = app
        .get(&format!("/admin/core/user/{}/change/", user.id()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text().contains("user@example.com"));
}

#[tokio::test]
async fn test_edit_unknown_user_not_found() {
    let app = TestApp::new();
    let token = staff_token(&app).await;

    let response = app
        .get(
            "/admin/core/user/00000000-0000-0000-0000-000000000000/change/",
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.get("/admin/core/user/42/change/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_page() {
    let app = TestApp::new();
    let token = staff_token(&app).await;

    let response = app.get(USER_ADD_URL, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.text();
    assert!(body.contains("name=\"email\""));
    assert!(body.contains("name=\"password1\""));
}

#[tokio::test]
async fn test_add_user_form_creates_user() {
    let app = TestApp::new();
    let token = staff_token(&app).await;

    let response = post_form(
        &app,
        &token,
        &format!(
            "email=New%40Example.com&name=New+User&password1={0}&password2={0}",
            PASSWORD
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let users = app.state.user_service.list().await.unwrap();
    let created = users
        .iter()
        .find(|u| u.email() == "new@example.com")
        .unwrap();
    assert_eq!(created.name(), "New User");
    assert!(!created.is_staff());

    let location = response.headers[header::LOCATION].to_str().unwrap();
    assert_eq!(location, format!("/admin/core/user/{}/change/", created.id()));
}

#[tokio::test]
async fn test_add_user_form_password_mismatch() {
    let app = TestApp::new();
    let token = staff_token(&app).await;

    let response = post_form(
        &app,
        &token,
        "email=new%40example.com&name=%3Cb%3Ebold%3C%2Fb%3E&password1=abcdef&password2=abcdeg",
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = response.text();
    assert!(body.contains("didn&#x27;t match"));
    assert!(body.contains("&lt;b&gt;bold&lt;&#x2F;b&gt;"));
    assert_eq!(app.state.user_service.count().await.unwrap(), 1);
}
