//! Photo intake integration tests.
//!
//! Run with: `cargo test -p intake-api --test photos_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::{photo_form, setup_test_app, setup_test_app_with, FailingRepository, PNG_BYTES};
use intake_core::models::Upload;
use intake_db::InMemoryRepository;
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_list_photos_empty() {
    let app = setup_test_app().await;

    let response = app.client().get("/").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["photos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_new_photo_form() {
    let app = setup_test_app().await;

    let response = app.client().get("/photos/new").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["photo"]["title"], "");
    assert!(body["photo"]["image"].is_null());
    assert_eq!(
        body["photo"]["accepted_content_types"],
        serde_json::json!(["image/jpg", "image/jpeg", "image/png", "image/gif"])
    );
    assert_eq!(body["errors"], serde_json::json!({}));
}

#[tokio::test]
async fn test_create_photo_capitalizes_title_and_redirects() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/photos")
        .multipart(photo_form("hello", "cat.png", "image/png", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(
        response.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/")
    );
    let body: Value = response.json();
    assert_eq!(body["flash"]["success"], "The photo was added!");
    assert_eq!(body["photo"]["title"], "Hello");
    assert_eq!(body["photo"]["image"]["file_name"], "cat.png");
    assert_eq!(body["photo"]["image"]["content_type"], "image/png");
    assert_eq!(body["photo"]["image"]["file_size"], PNG_BYTES.len());

    let list: Value = app.client().get("/photos").await.json();
    let photos = list["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["title"], "Hello");
    assert_eq!(app.stored_files().len(), 1);
}

#[tokio::test]
async fn test_create_photo_with_empty_title() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/photos")
        .multipart(photo_form("", "cat.png", "image/png", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 303);
    let body: Value = response.json();
    assert_eq!(body["photo"]["title"], "");
}

#[tokio::test]
async fn test_create_photo_without_title_field() {
    let app = setup_test_app().await;
    let form = MultipartForm::new().add_part(
        "image",
        axum_test::multipart::Part::bytes(PNG_BYTES)
            .file_name("cat.png")
            .mime_type("image/png"),
    );

    let response = app.client().post("/photos").multipart(form).await;

    assert_eq!(response.status_code(), 303);
    let body: Value = response.json();
    assert_eq!(body["photo"]["title"], "");
}

#[tokio::test]
async fn test_rejects_zip_as_image() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/photos")
        .multipart(photo_form("x", "x.zip", "application/zip", b"PK\x03\x04"))
        .await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["photo"]["title"], "x");
    assert_eq!(body["photo"]["image"], "x.zip");
    let errors = body["errors"]["image"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("application/zip"));

    let list: Value = app.client().get("/").await.json();
    assert_eq!(list["photos"], serde_json::json!([]));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_rejects_missing_image() {
    let app = setup_test_app().await;
    let form = MultipartForm::new().add_text("title", "no file");

    let response = app.client().post("/photos").multipart(form).await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["errors"]["image"], serde_json::json!(["must be attached"]));
}

#[tokio::test]
async fn test_content_type_parameters_and_case_are_ignored() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/photos")
        .multipart(photo_form("gif", "a.gif", "IMAGE/GIF", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 303);
    let body: Value = response.json();
    assert_eq!(body["photo"]["image"]["content_type"], "image/gif");
}

#[tokio::test]
async fn test_list_preserves_creation_order() {
    let app = setup_test_app().await;
    for title in ["first", "second", "third"] {
        let response = app
            .client()
            .post("/photos")
            .multipart(photo_form(title, "cat.png", "image/png", PNG_BYTES))
            .await;
        assert_eq!(response.status_code(), 303);
    }

    let first: Value = app.client().get("/").await.json();
    let second: Value = app.client().get("/photos").await.json();
    let titles: Vec<&str> = first["photos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_same_file_name_twice_keeps_both_files() {
    let app = setup_test_app().await;
    for _ in 0..2 {
        app.client()
            .post("/photos")
            .multipart(photo_form("cat", "cat.png", "image/png", PNG_BYTES))
            .await;
    }

    assert_eq!(app.stored_files().len(), 2);
}

#[tokio::test]
async fn test_failed_insert_leaves_no_file() {
    let app = setup_test_app_with(
        Arc::new(FailingRepository),
        Arc::new(InMemoryRepository::<Upload>::new()),
        50 * 1024 * 1024,
    )
    .await;

    let response = app
        .client()
        .post("/photos")
        .multipart(photo_form("hello", "cat.png", "image/png", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_non_multipart_body_is_bad_request() {
    let app = setup_test_app().await;

    let response = app.client().post("/photos").text("title=hello").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = setup_test_app_with(
        Arc::new(InMemoryRepository::<intake_core::models::Photo>::new()),
        Arc::new(InMemoryRepository::<Upload>::new()),
        64,
    )
    .await;
    static BIG: [u8; 4096] = [7u8; 4096];

    let response = app
        .client()
        .post("/photos")
        .multipart(photo_form("big", "big.png", "image/png", &BIG))
        .await;

    assert_eq!(response.status_code(), 413);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_stored_image_is_served_from_its_url() {
    let app = setup_test_app().await;

    let created: Value = app
        .client()
        .post("/photos")
        .multipart(photo_form("cat", "my cat.png", "image/png", PNG_BYTES))
        .await
        .json();
    let url = created["photo"]["image"]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/system/photos/images/"));
    assert!(url.ends_with("/original/my_cat.png"));

    let response = app.client().get(&url).await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(response.as_bytes().as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn test_unknown_file_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/system/photos/images/missing/original/cat.png")
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_file_name_with_double_dot_is_stored() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/photos")
        .multipart(photo_form("hello", "holiday..png", "image/png", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 303);
    let body: Value = response.json();
    assert_eq!(body["photo"]["image"]["file_name"], "holiday.png");
    assert_eq!(app.stored_files().len(), 1);

    let url = body["photo"]["image"]["url"].as_str().unwrap().to_string();
    assert_eq!(app.client().get(&url).await.status_code(), 200);
}
