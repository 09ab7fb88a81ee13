//! Uploads over HTTP and the orphan audit that cleans up after them.

use std::sync::Arc;

use axum::http::StatusCode;
use uuid::Uuid;

use inkwell_database::Stores;
use inkwell_service::MediaAuditService;

use crate::helpers::{Multipart, TestApp, png};

fn audit_service(app: &TestApp) -> MediaAuditService {
    MediaAuditService::new(
        Stores::memory(app.store.clone()).media_references,
        Arc::new(app.config.media.clone()),
    )
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_editor_upload_stores_jpeg() {
    let app = TestApp::new().await;
    let form = Multipart::new().file("upload", "diagram.png", &png(64, 48));

    let response = app
        .multipart("POST", "/api/uploads/editor", form, Some(Uuid::new_v4()))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let url = response.body["url"].as_str().unwrap();
    assert!(url.starts_with("/media/posts/"));
    assert!(url.ends_with(".jpg"));
    let relative = url.trim_start_matches("/media/");
    assert!(app.media_path(relative).is_file());
}

#[tokio::test]
async fn test_editor_upload_rejects_extension() {
    let app = TestApp::new().await;
    let form = Multipart::new().file("upload", "script.exe", b"MZ");

    let response = app
        .multipart("POST", "/api/uploads/editor", form, Some(Uuid::new_v4()))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["error"]["message"]
            .as_str()
            .unwrap()
            .contains(".exe")
    );
}

#[tokio::test]
async fn test_editor_upload_requires_login() {
    let app = TestApp::new().await;
    let form = Multipart::new().file("upload", "diagram.png", &png(8, 8));

    let response = app
        .multipart("POST", "/api/uploads/editor", form, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_editor_upload_without_file_field() {
    let app = TestApp::new().await;
    let form = Multipart::new().text("note", "no file here");

    let response = app
        .multipart("POST", "/api/uploads/editor", form, Some(Uuid::new_v4()))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"]["message"],
        "Invalid request or no file uploaded"
    );
}

#[tokio::test]
async fn test_profile_image_is_cropped_to_square() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();
    let form = Multipart::new()
        .file("image", "me.png", &png(800, 600))
        .text("x", "100")
        .text("y", "50")
        .text("width", "400")
        .text("height", "400");

    let response = app
        .multipart("PUT", "/api/profile/image", form, Some(user))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let path = response.body["data"]["image"].as_str().unwrap();
    assert!(path.starts_with(&format!("profile_pics/{}_", user.simple())));

    let stored = image::open(app.media_path(path)).unwrap();
    assert_eq!(stored.width(), 300);
    assert_eq!(stored.height(), 300);
}

#[tokio::test]
async fn test_profile_image_rejects_garbage() {
    let app = TestApp::new().await;
    let form = Multipart::new().file("image", "me.png", b"not an image");

    let response = app
        .multipart("PUT", "/api/profile/image", form, Some(Uuid::new_v4()))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_IMAGE");
}

#[tokio::test]
async fn test_article_feature_image_is_stored() {
    let app = TestApp::new().await;
    let author = Uuid::new_v4();
    let form = Multipart::new()
        .text("title", "With a cover")
        .text("content", "<p>Look</p>")
        .file("image", "cover.png", &png(120, 80));

    let response = app
        .multipart("POST", "/api/articles", form, Some(author))
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["slug"], "with-a-cover");
    let path = response.body["data"]["feature_image"].as_str().unwrap();
    assert!(path.starts_with(&format!("post_images/post_{}_", author.simple())));
    assert!(app.media_path(path).is_file());
}

#[tokio::test]
async fn test_audit_purges_only_unreferenced_uploads() {
    let app = TestApp::new().await;
    let user = Uuid::new_v4();

    // Editor upload nobody embeds.
    let response = app
        .multipart(
            "POST",
            "/api/uploads/editor",
            Multipart::new().file("upload", "stray.png", &png(32, 32)),
            Some(user),
        )
        .await;
    let stray = response.body["url"]
        .as_str()
        .unwrap()
        .trim_start_matches("/media/")
        .to_string();

    // Editor upload embedded in an article body.
    let response = app
        .multipart(
            "POST",
            "/api/uploads/editor",
            Multipart::new().file("upload", "used.png", &png(32, 32)),
            Some(user),
        )
        .await;
    let used_url = response.body["url"].as_str().unwrap().to_string();
    let used = used_url.trim_start_matches("/media/").to_string();
    let body = format!("<p>See</p><img src=\"{used_url}\">");
    let response = app
        .multipart(
            "POST",
            "/api/articles",
            Multipart::new().text("title", "Embeds").text("content", &body),
            Some(user),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    // Two profile pictures; the first is superseded.
    let first = app
        .multipart(
            "PUT",
            "/api/profile/image",
            Multipart::new().file("image", "a.png", &png(40, 40)),
            Some(user),
        )
        .await;
    let first = first.body["data"]["image"].as_str().unwrap().to_string();
    let second = app
        .multipart(
            "PUT",
            "/api/profile/image",
            Multipart::new().file("image", "b.png", &png(40, 40)),
            Some(user),
        )
        .await;
    let second = second.body["data"]["image"].as_str().unwrap().to_string();

    let audit = audit_service(&app);

    let dry = audit.run(true).await.unwrap();
    let mut expected = vec![stray.clone(), first.clone()];
    expected.sort();
    assert_eq!(dry.orphans, expected);
    assert!(dry.purge.deleted.is_empty());
    assert!(app.media_path(&stray).is_file());

    let report = audit.run(false).await.unwrap();
    assert_eq!(report.purge.deleted, expected);
    assert!(report.purge.failed.is_empty());
    assert!(!app.media_path(&stray).exists());
    assert!(!app.media_path(&first).exists());
    assert!(app.media_path(&used).is_file());
    assert!(app.media_path(&second).is_file());

    let again = audit.find_orphans().await.unwrap();
    assert!(again.orphans.is_empty());
}
