//! Article reads over HTTP: detail, listings, search, categories, home.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::{Multipart, TestApp};

fn titles(items: &[Value]) -> Vec<&str> {
    items
        .iter()
        .map(|a| a["title"].as_str().unwrap_or_default())
        .collect()
}

#[tokio::test]
async fn test_draft_detail_is_visible_to_author_only() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let draft = app.draft_article(author, "Private notes").await;
    let path = format!("/api/articles/{draft}");

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app.request("GET", &path, None, Some(Uuid::new_v4())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", &path, None, Some(author)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "draft");
    assert_eq!(response.body["data"]["views"], 0);
}

#[tokio::test]
async fn test_detail_view_counts_reads() {
    let app = TestApp::new().await;
    let article = app.publish_article(Uuid::new_v4(), "Counted").await;
    let path = format!("/api/articles/{article}");

    app.request("GET", &path, None, None).await;
    app.request("GET", &path, None, None).await;
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["views"], 3);

    let response = app.request("GET", "/api/articles/popular", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"][0]["views"], 3);
}

#[tokio::test]
async fn test_listing_pages_published_articles() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    for i in 0..7 {
        app.publish_article(author, &format!("Post {i}")).await;
    }
    app.draft_article(author, "Unpublished").await;

    let response = app.request("GET", "/api/articles", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 7);
    assert_eq!(response.items().len(), 6);
    assert!(!titles(response.items()).contains(&"Unpublished"));

    let response = app
        .request("GET", "/api/articles?page=two", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["page"], 1);

    let response = app.request("GET", "/api/articles?page=2", None, None).await;
    assert_eq!(response.items().len(), 1);
}

#[tokio::test]
async fn test_search_covers_title_and_body() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    app.create_article(author, "Hiking", "<p>Three days in the Alps</p>", "published")
        .await;
    app.create_article(author, "Alpine lakes", "<p>Cold water</p>", "published")
        .await;
    app.create_article(author, "Alps draft", "<p>Soon</p>", "draft")
        .await;

    let response = app
        .request("GET", "/api/articles/search?q=ALP", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let mut found = titles(response.items());
    found.sort();
    assert_eq!(found, vec!["Alpine lakes", "Hiking"]);

    let response = app.request("GET", "/api/articles/search", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.items().is_empty());
}

#[tokio::test]
async fn test_author_listing_and_own_drafts() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    app.publish_article(author, "Public").await;
    app.draft_article(author, "Mine").await;
    app.draft_article(Uuid::new_v4(), "Theirs").await;

    let response = app
        .request("GET", &format!("/api/authors/{author}/articles"), None, None)
        .await;
    assert_eq!(titles(response.items()), vec!["Public"]);

    let response = app.request("GET", "/api/articles/drafts", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/articles/drafts", None, Some(author))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(titles(response.items()), vec!["Mine"]);
    assert_eq!(response.body["data"]["page_size"], 10);
}

#[tokio::test]
async fn test_categories_are_staff_managed() {
    let app = TestApp::new().await;
    let staff = Uuid::new_v4();
    let author = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "Travel" })),
            Some(author),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request_as_staff("POST", "/api/categories", Some(json!({ "name": "Travel" })), staff)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["slug"], "travel");
    let category = response.id();

    let response = app
        .request_as_staff("POST", "/api/categories", Some(json!({ "name": "Travel" })), staff)
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");

    let form = Multipart::new()
        .text("title", "Lisbon")
        .text("content", "<p>Trams</p>")
        .text("category_id", &category.to_string());
    let response = app
        .multipart("POST", "/api/articles", form, Some(author))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.request("GET", "/api/categories", None, None).await;
    assert_eq!(response.body["data"][0]["name"], "Travel");
    assert_eq!(response.body["data"][0]["post_count"], 1);

    let response = app
        .request("GET", "/api/categories/travel/articles", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["category"]["name"], "Travel");
    assert_eq!(response.body["data"]["articles"]["items"][0]["title"], "Lisbon");

    let response = app
        .request("GET", "/api/categories/nowhere/articles", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_home_page_sections() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    for i in 0..8 {
        app.publish_article(author, &format!("Story {i}")).await;
    }

    let response = app.request("GET", "/api/home", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["latest"].as_array().unwrap().len(), 6);
    assert_eq!(response.body["data"]["popular"].as_array().unwrap().len(), 4);
    assert!(response.body["data"]["top_categories"].as_array().unwrap().is_empty());
}
