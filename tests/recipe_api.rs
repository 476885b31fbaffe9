//! Recipe API tests: CRUD, filtering, image upload and owner cascade

mod common;

use std::collections::HashSet;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{TestApp, IMAGE_ID};

const RECIPES_URL: &str = "/api/recipe/recipes/";
const TAGS_URL: &str = "/api/recipe/tags/";
const INGREDIENTS_URL: &str = "/api/recipe/ingredients/";

fn detail_url(id: &str) -> String {
    format!("{}{}/", RECIPES_URL, id)
}

fn image_upload_url(id: &str) -> String {
    format!("{}{}/upload-image/", RECIPES_URL, id)
}

async fn create_attribute(app: &TestApp, base: &str, token: &str, name: &str) -> String {
    let response = app.post(base, Some(token), json!({ "name": name })).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

    response.json()["id"].as_str().unwrap().to_string()
}

async fn create_recipe(app: &TestApp, token: &str, payload: Value) -> Value {
    let mut body = json!({ "title": "Sample recipe", "time_minutes": 10, "price": "5.00" });
    if let (Some(target), Some(extra)) = (body.as_object_mut(), payload.as_object()) {
        target.extend(extra.clone());
    }

    let response = app.post(RECIPES_URL, Some(token), body).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());

    response.json()
}

fn titles(value: &Value) -> HashSet<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

fn title_set(titles: &[&str]) -> HashSet<String> {
    titles.iter().map(|t| t.to_string()).collect()
}

#[tokio::test]
async fn test_auth_required() {
    let app = TestApp::new();

    let response = app.get(RECIPES_URL, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_basic_recipe() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let recipe = create_recipe(
        &app,
        &token,
        json!({ "title": "Chocolate cheesecake", "time_minutes": 30, "price": 5.5 }),
    )
    .await;

    assert_eq!(recipe["title"], "Chocolate cheesecake");
    assert_eq!(recipe["time_minutes"], 30);
    assert_eq!(recipe["price"], "5.50");
    assert_eq!(recipe["tags"], json!([]));
    assert_eq!(recipe["ingredients"], json!([]));
}

#[tokio::test]
async fn test_create_recipe_with_tags_and_ingredients() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let vegan = create_attribute(&app, TAGS_URL, &token, "Vegan").await;
    let dessert = create_attribute(&app, TAGS_URL, &token, "Dessert").await;
    let prawns = create_attribute(&app, INGREDIENTS_URL, &token, "Prawns").await;

    let recipe = create_recipe(
        &app,
        &token,
        json!({
            "title": "Avocado lime cheesecake",
            "time_minutes": 60,
            "price": "20.00",
            "tags": [vegan, dessert],
            "ingredients": [prawns],
        }),
    )
    .await;

    assert_eq!(recipe["tags"], json!([vegan, dessert]));
    assert_eq!(recipe["ingredients"], json!([prawns]));

    let id = recipe["id"].as_str().unwrap();
    let response = app.get(&detail_url(id), Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let detail = response.json();
    assert_eq!(detail["tags"][0], json!({ "id": vegan, "name": "Vegan" }));
    assert_eq!(detail["tags"][1], json!({ "id": dessert, "name": "Dessert" }));
    assert_eq!(detail["ingredients"][0]["name"], "Prawns");
    assert_eq!(detail["price"], "20.00");
    assert!(detail["image"].is_null());
}

#[tokio::test]
async fn test_create_recipe_with_foreign_tag_rejected() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let other = app.login("other@example.com").await;

    let foreign = create_attribute(&app, TAGS_URL, &other, "Theirs").await;

    let response = app
        .post(
            RECIPES_URL,
            Some(&token),
            json!({ "title": "Stolen", "time_minutes": 5, "price": "1.00", "tags": [foreign] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.get(RECIPES_URL, Some(&token)).await.json(), json!([]));
}

#[tokio::test]
async fn test_create_recipe_invalid_price() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let response = app
        .post(
            RECIPES_URL,
            Some(&token),
            json!({ "title": "Too pricey", "time_minutes": 5, "price": "1000.00" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post(
            RECIPES_URL,
            Some(&token),
            json!({ "title": "Too precise", "time_minutes": 5, "price": "1.005" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_recipes_limited_to_user_newest_first() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let other = app.login("other@example.com").await;

    create_recipe(&app, &other, json!({ "title": "Not mine" })).await;
    create_recipe(&app, &token, json!({ "title": "First" })).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    create_recipe(&app, &token, json!({ "title": "Second" })).await;

    let response = app.get(RECIPES_URL, Some(&token)).await;
    let body = response.json();

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["title"], "Second");
    assert_eq!(body[1]["title"], "First");
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let tag = create_attribute(&app, TAGS_URL, &token, "Thai").await;
    let recipe = create_recipe(&app, &token, json!({ "title": "Curry", "tags": [tag] })).await;
    let url = detail_url(recipe["id"].as_str().unwrap());

    let response = app
        .request(Method::PATCH, &url, Some(&token), Some(json!({ "title": "Green curry" })))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["title"], "Green curry");
    assert_eq!(body["time_minutes"], 10);
    assert_eq!(body["tags"], json!([tag]));

    let response = app
        .request(Method::PATCH, &url, Some(&token), Some(json!({ "tags": [] })))
        .await;
    assert_eq!(response.json()["tags"], json!([]));
}

#[tokio::test]
async fn test_full_update_replaces_fields() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let tag = create_attribute(&app, TAGS_URL, &token, "Old").await;
    let recipe = create_recipe(&app, &token, json!({ "title": "Spaghetti", "tags": [tag] })).await;
    let url = detail_url(recipe["id"].as_str().unwrap());

    let response = app
        .request(
            Method::PUT,
            &url,
            Some(&token),
            Some(json!({ "title": "Carbonara", "time_minutes": 25, "price": "7.25", "tags": [] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["title"], "Carbonara");
    assert_eq!(body["time_minutes"], 25);
    assert_eq!(body["price"], "7.25");
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn test_delete_recipe_and_foreign_access() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let other = app.login("other@example.com").await;

    let recipe = create_recipe(&app, &token, json!({ "title": "Mine" })).await;
    let url = detail_url(recipe["id"].as_str().unwrap());

    let response = app.get(&url, Some(&other)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request(Method::DELETE, &url, Some(&other), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request(Method::DELETE, &url, Some(&token), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.get(&url, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filter_by_tags_and_ingredients() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let vegan = create_attribute(&app, TAGS_URL, &token, "Vegan").await;
    let vegetarian = create_attribute(&app, TAGS_URL, &token, "Vegetarian").await;
    let feta = create_attribute(&app, INGREDIENTS_URL, &token, "Feta cheese").await;
    let chicken = create_attribute(&app, INGREDIENTS_URL, &token, "Chicken").await;

    create_recipe(&app, &token, json!({ "title": "Thai curry", "tags": [vegan] })).await;
    create_recipe(&app, &token, json!({ "title": "Aubergine tahini", "tags": [vegetarian] }))
        .await;
    create_recipe(&app, &token, json!({ "title": "Fish and chips" })).await;
    create_recipe(&app, &token, json!({ "title": "Feta bake", "ingredients": [feta] })).await;
    create_recipe(
        &app,
        &token,
        json!({ "title": "Chicken salad", "tags": [vegetarian], "ingredients": [chicken] }),
    )
    .await;

    let response = app
        .get(&format!("{}?tags={},{}", RECIPES_URL, vegan, vegetarian), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        titles(&response.json()),
        title_set(&["Thai curry", "Aubergine tahini", "Chicken salad"])
    );

    let response = app
        .get(&format!("{}?ingredients={},{}", RECIPES_URL, feta, chicken), Some(&token))
        .await;
    assert_eq!(titles(&response.json()), title_set(&["Feta bake", "Chicken salad"]));

    let response = app
        .get(
            &format!("{}?tags={}&ingredients={}", RECIPES_URL, vegetarian, chicken),
            Some(&token),
        )
        .await;
    assert_eq!(titles(&response.json()), title_set(&["Chicken salad"]));
}

#[tokio::test]
async fn test_filter_with_malformed_id() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;

    let response = app.get(&format!("{}?tags=abc", RECIPES_URL), Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["param"], "tags");
}

#[tokio::test]
async fn test_upload_image() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let recipe = create_recipe(&app, &token, json!({})).await;
    let id = recipe["id"].as_str().unwrap();

    let response = app
        .upload(&image_upload_url(id), &token, "image", "photo.jpg", "image/jpeg", b"\xff\xd8\xff\xe0fake")
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.text());

    let expected = format!("/media/uploads/recipe/{}.jpg", IMAGE_ID);
    assert_eq!(response.json(), json!({ "id": id, "image": expected }));

    let stored = app.media.path().join(format!("uploads/recipe/{}.jpg", IMAGE_ID));
    assert!(stored.exists());

    let detail = app.get(&detail_url(id), Some(&token)).await.json();
    assert_eq!(detail["image"], expected);

    let served = app.get(&expected, None).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(served.body, b"\xff\xd8\xff\xe0fake");
}

#[tokio::test]
async fn test_upload_image_bad_request() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let recipe = create_recipe(&app, &token, json!({})).await;
    let url = image_upload_url(recipe["id"].as_str().unwrap());

    let response = app
        .upload(&url, &token, "image", "notes.txt", "text/plain", b"notanimage")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .upload(&url, &token, "photo", "photo.jpg", "image/jpeg", b"data")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["param"], "image");

    let response = app.upload(&url, &token, "image", "empty.png", "image/png", b"").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert!(!app.media.path().join("uploads").join("recipe").join(format!("{}.txt", IMAGE_ID)).exists());
}

#[tokio::test]
async fn test_upload_image_to_foreign_recipe() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let other = app.login("other@example.com").await;
    let recipe = create_recipe(&app, &other, json!({})).await;

    let response = app
        .upload(
            &image_upload_url(recipe["id"].as_str().unwrap()),
            &token,
            "image",
            "photo.jpg",
            "image/jpeg",
            b"data",
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_user_removes_owned_records() {
    let app = TestApp::new();
    let token = app.login("user@example.com").await;
    let other = app.login("other@example.com").await;

    let tag = create_attribute(&app, TAGS_URL, &token, "Mine").await;
    create_attribute(&app, INGREDIENTS_URL, &token, "Flour").await;
    create_recipe(&app, &token, json!({ "tags": [tag] })).await;
    create_recipe(&app, &other, json!({ "title": "Survivor" })).await;

    let users = app.state.user_service.list().await.unwrap();
    let user = users
        .iter()
        .find(|u| u.email() == "user@example.com")
        .unwrap();

    assert!(app.state.user_service.delete(user.id()).await.unwrap());

    let response = app.get(RECIPES_URL, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.get(RECIPES_URL, Some(&other)).await;
    assert_eq!(titles(&response.json()), title_set(&["Survivor"]));

    let owner = *user.id();
    let tags = app.state.tag_service.list(&owner, false).await.unwrap();
    let ingredients = app.state.ingredient_service.list(&owner, false).await.unwrap();
    assert!(tags.is_empty());
    assert!(ingredients.is_empty());
}
