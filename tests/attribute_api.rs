//! Tag and ingredient API tests
//!
//! Both collections share one implementation, so most cases run against
//! each of them.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{ids, names, TestApp};

const TAGS_URL: &str = "/api/recipe/tags/";
const INGREDIENTS_URL: &str = "/api/recipe/ingredients/";
const RECIPES_URL: &str = "/api/recipe/recipes/";

fn detail_url(base: &str, id: &str) -> String {
    format!("{}{}/", base, id)
}

async fn create(app: &TestApp, base: &str, token: &str, name: &str) -> String {
    let response = app.post(base, Some(token), json!({ "name": name })).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

    response.json()["id"].as_str().unwrap().to_string()
}

async fn create_recipe(app: &TestApp, token: &str, title: &str, body: Value) -> String {
    let mut payload = json!({ "title": title, "time_minutes": 10, "price": "5.00" });
    if let (Some(target), Some(extra)) = (payload.as_object_mut(), body.as_object()) {
        target.extend(extra.clone());
    }

    let response = app.post(RECIPES_URL, Some(token), payload).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

    response.json()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_login_required() {
    let app = TestApp::new();

    for base in [TAGS_URL, INGREDIENTS_URL] {
        let response = app.get(base, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", base);
    }
}

#[tokio::test]
async fn test_list_ordered_by_name_descending() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    for base in [TAGS_URL, INGREDIENTS_URL] {
        create(&app, base, &token, "Dessert").await;
        create(&app, base, &token, "Vegan").await;
        create(&app, base, &token, "Breakfast").await;

        let response = app.get(base, Some(&token)).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(names(&response.json()), vec!["Vegan", "Dessert", "Breakfast"]);
    }
}

#[tokio::test]
async fn test_list_limited_to_user() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let other = app.login("other@example.com").await;

    for base in [TAGS_URL, INGREDIENTS_URL] {
        create(&app, base, &other, "Fruity").await;
        let id = create(&app, base, &token, "Comfort Food").await;

        let response = app.get(base, Some(&token)).await;
        let body = response.json();

        assert_eq!(names(&body), vec!["Comfort Food"]);
        assert_eq!(ids(&body), vec![id]);
    }
}

#[tokio::test]
async fn test_create_successful() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let id = create(&app, TAGS_URL, &token, "Test tag").await;

    let response = app.get(&detail_url(TAGS_URL, &id), Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({ "id": id, "name": "Test tag" }));
}

#[tokio::test]
async fn test_create_invalid_name() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    for base in [TAGS_URL, INGREDIENTS_URL] {
        let response = app.post(base, Some(&token), json!({ "name": "" })).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let response = app.post(base, Some(&token), json!({ "name": "x".repeat(256) })).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let response = app.get(base, Some(&token)).await;
        assert_eq!(response.json(), json!([]));
    }
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    for base in [TAGS_URL, INGREDIENTS_URL] {
        let id = create(&app, base, &token, "Salt").await;
        let url = detail_url(base, &id);

        let response = app
            .request(Method::PATCH, &url, Some(&token), Some(json!({ "name": "Pepper" })))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["name"], "Pepper");

        let response = app
            .request(Method::PUT, &url, Some(&token), Some(json!({ "name": "Sugar" })))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["name"], "Sugar");

        let response = app.request(Method::DELETE, &url, Some(&token), None).await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);

        let response = app.get(&url, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_foreign_and_malformed_ids_not_found() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let other = app.login("other@example.com").await;

    let id = create(&app, TAGS_URL, &other, "Private").await;
    let url = detail_url(TAGS_URL, &id);

    let response = app.get(&url, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request(Method::DELETE, &url, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.get(&detail_url(TAGS_URL, "not-a-uuid"), Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_assigned_only() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let breakfast = create(&app, TAGS_URL, &token, "Breakfast").await;
    create(&app, TAGS_URL, &token, "Lunch").await;
    create_recipe(&app, &token, "Coriander eggs on toast", json!({ "tags": [breakfast] })).await;

    let response = app.get(&format!("{}?assigned_only=1", TAGS_URL), Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.json()), vec!["Breakfast"]);

    let response = app.get(&format!("{}?assigned_only=0", TAGS_URL), Some(&token)).await;
    assert_eq!(names(&response.json()), vec!["Lunch", "Breakfast"]);
}

#[tokio::test]
async fn test_filter_assigned_only_unique() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let eggs = create(&app, INGREDIENTS_URL, &token, "Eggs").await;
    create(&app, INGREDIENTS_URL, &token, "Cheese").await;
    create_recipe(&app, &token, "Eggs benedict", json!({ "ingredients": [eggs] })).await;
    create_recipe(&app, &token, "Herb eggs", json!({ "ingredients": [eggs] })).await;

    let response = app
        .get(&format!("{}?assigned_only=1", INGREDIENTS_URL), Some(&token))
        .await;

    assert_eq!(names(&response.json()), vec!["Eggs"]);
}

#[tokio::test]
async fn test_filter_assigned_only_invalid_value() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let response = app.get(&format!("{}?assigned_only=yes", TAGS_URL), Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["param"], "assigned_only");
}

#[tokio::test]
async fn test_deleting_tag_detaches_it_from_recipes() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let tag = create(&app, TAGS_URL, &token, "Spicy").await;
    let recipe = create_recipe(&app, &token, "Chilli", json!({ "tags": [tag] })).await;

    let response = app
        .request(Method::DELETE, &detail_url(TAGS_URL, &tag), Some(&token), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.get(&detail_url(RECIPES_URL, &recipe), Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["tags"], json!([]));
}
