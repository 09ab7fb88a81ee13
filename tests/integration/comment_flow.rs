//! Comment threads over HTTP: posting, listing, deleting, moderating.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_anonymous_comment_is_rejected() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Hello").await;

    let response = app
        .request(
            "POST",
            &format!("/api/articles/{article}/comments"),
            Some(json!({ "content": "hi" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_empty_comment_is_rejected() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Hello").await;

    let response = app
        .request(
            "POST",
            &format!("/api/articles/{article}/comments"),
            Some(json!({ "content": "" })),
            Some(author),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_on_missing_article_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            &format!("/api/articles/{}/comments", Uuid::new_v4()),
            Some(json!({ "content": "hi" })),
            Some(Uuid::new_v4()),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_thread_lists_depth_first() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let reader = Uuid::new_v4();
    let article = app.publish_article(author, "Threads").await;

    let first = app.comment(reader, article, "first", None).await;
    let second = app.comment(reader, article, "second", None).await;
    let reply = app.comment(author, article, "reply", Some(first)).await;

    let response = app
        .request("GET", &format!("/api/articles/{article}/comments"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.items();
    let order: Vec<(String, u64)> = items
        .iter()
        .map(|c| {
            (
                c["id"].as_str().unwrap().to_string(),
                c["depth"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            (first.to_string(), 0),
            (reply.to_string(), 1),
            (second.to_string(), 0),
        ]
    );
}

#[tokio::test]
async fn test_page_past_the_end_returns_last_page() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Busy").await;
    for i in 0..7 {
        app.comment(author, article, &format!("c{i}"), None).await;
    }

    let response = app
        .request(
            "GET",
            &format!("/api/articles/{article}/comments?page=99"),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["page"], 2);
    assert_eq!(response.body["data"]["total_items"], 7);
    assert_eq!(response.items().len(), 2);
}

#[tokio::test]
async fn test_non_numeric_page_falls_back_to_first() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Lenient").await;
    for i in 0..3 {
        app.comment(author, article, &format!("c{i}"), None).await;
    }

    let response = app
        .request(
            "GET",
            &format!("/api/articles/{article}/comments?page=abc&per_page=2"),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["page"], 1);
    assert_eq!(response.body["data"]["page_size"], 2);
    assert_eq!(response.body["data"]["total_pages"], 2);
    assert_eq!(response.items().len(), 2);
}

#[tokio::test]
async fn test_draft_thread_is_hidden_from_others() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let draft = app.draft_article(author, "Work in progress").await;
    let path = format!("/api/articles/{draft}/comments");

    let response = app
        .request("POST", &path, Some(json!({ "content": "first!" })), Some(stranger))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", &path, None, Some(stranger)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    app.comment(author, draft, "todo: add photos", None).await;
    let response = app.request("GET", &path, None, Some(author)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.items().len(), 1);
}

#[tokio::test]
async fn test_only_the_author_may_delete() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Mine").await;
    let comment = app.comment(author, article, "keep me", None).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/comments/{comment}"),
            None,
            Some(Uuid::new_v4()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/comments/{comment}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_tombstones_then_prunes() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let reader = Uuid::new_v4();
    let article = app.publish_article(author, "Prune").await;
    let parent = app.comment(reader, article, "parent", None).await;
    let child = app.comment(author, article, "child", Some(parent)).await;

    let response = app
        .request("DELETE", &format!("/api/comments/{parent}"), None, Some(reader))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["outcome"], "tombstoned");
    assert_eq!(
        response.body["data"]["comment"]["content"],
        "[This comment has been deleted]"
    );
    assert!(response.body["data"]["comment"]["author_id"].is_null());

    let response = app
        .request("DELETE", &format!("/api/comments/{child}"), None, Some(author))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["outcome"], "removed");
    assert_eq!(
        response.body["data"]["removed"],
        json!([child.to_string(), parent.to_string()])
    );

    assert!(app.store.all_comments_for_article(article).await.is_empty());
}

#[tokio::test]
async fn test_tombstone_cannot_be_deleted_again() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Again").await;
    let parent = app.comment(author, article, "parent", None).await;
    app.comment(author, article, "child", Some(parent)).await;

    app.request("DELETE", &format!("/api/comments/{parent}"), None, Some(author))
        .await;
    let response = app
        .request("DELETE", &format!("/api/comments/{parent}"), None, Some(author))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_staff_can_hide_a_comment() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let article = app.publish_article(author, "Moderated").await;
    let comment = app.comment(author, article, "spam", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/comments/{comment}/active"),
            Some(json!({ "active": false })),
            Some(author),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request_as_staff(
            "PUT",
            &format!("/api/comments/{comment}/active"),
            Some(json!({ "active": false })),
            Uuid::new_v4(),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_active"], false);

    let response = app
        .request("GET", &format!("/api/articles/{article}/comments"), None, None)
        .await;
    assert!(response.items().is_empty());
}
