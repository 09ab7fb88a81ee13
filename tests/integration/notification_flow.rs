//! The notification feed over HTTP.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_feed_requires_login() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/notifications", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_root_comment_notifies_article_author() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let reader = Uuid::new_v4();
    let article = app.publish_article(author, "Notify me").await;
    app.comment(reader, article, "nice post", None).await;

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(author))
        .await;
    assert_eq!(response.body["data"]["count"], 1);

    let response = app
        .request("GET", "/api/notifications", None, Some(author))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["verb"], "commented_on_article");
    assert_eq!(items[0]["actor_id"], reader.to_string());
    assert_eq!(items[0]["target_id"], article.to_string());
    assert_eq!(items[0]["is_read"], false);

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(author))
        .await;
    assert_eq!(response.body["data"]["count"], 0);
}

#[tokio::test]
async fn test_reply_notifies_parent_author_not_self() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let reader = Uuid::new_v4();
    let article = app.publish_article(author, "Replies").await;
    let question = app.comment(reader, article, "question?", None).await;
    let answer = app.comment(author, article, "answer", Some(question)).await;
    app.comment(reader, article, "talking to myself", Some(question))
        .await;

    let response = app
        .request("GET", "/api/notifications", None, Some(reader))
        .await;
    let items = response.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["verb"], "replied_to_comment");
    assert_eq!(items[0]["target_id"], answer.to_string());

    // The author is notified of the root comment only; their own reply is silent.
    let response = app
        .request("GET", "/api/notifications", None, Some(author))
        .await;
    assert_eq!(response.items().len(), 1);
}

#[tokio::test]
async fn test_mark_all_read_and_clear() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Busy inbox").await;
    for _ in 0..3 {
        app.comment(Uuid::new_v4(), article, "hello", None).await;
    }

    let response = app
        .request("PUT", "/api/notifications/read-all", None, Some(author))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["marked"], 3);

    let response = app
        .request("DELETE", "/api/notifications", None, Some(author))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["removed"], 3);

    let response = app
        .request("GET", "/api/notifications", None, Some(author))
        .await;
    assert!(response.items().is_empty());
    assert_eq!(response.body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_feed_is_paginated() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Popular").await;
    for _ in 0..12 {
        app.comment(Uuid::new_v4(), article, "me too", None).await;
    }

    let response = app
        .request("GET", "/api/notifications?page=2", None, Some(author))
        .await;

    assert_eq!(response.body["data"]["page"], 2);
    assert_eq!(response.body["data"]["total_items"], 12);
    assert_eq!(response.items().len(), 2);
}
