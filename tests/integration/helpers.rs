//! Shared test helpers for integration tests.

use std::io::Cursor;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use inkwell_core::config::{AppConfig, DatabaseProvider};
use inkwell_core::traits::storage::StorageProvider;
use inkwell_database::{MemoryStore, Stores};
use inkwell_media::LocalStorageProvider;

/// Multipart boundary used by [`Multipart`].
const BOUNDARY: &str = "inkwell-test-boundary";

/// Test application context
pub struct TestApp {
    /// The fully layered router
    pub router: Router,
    /// Backing store, for direct inspection
    pub store: MemoryStore,
    /// Application config
    pub config: AppConfig,
    /// Media root; removed on drop
    pub media: TempDir,
}

impl TestApp {
    /// Create a new test application over a fresh memory store and media root.
    pub async fn new() -> Self {
        let media = TempDir::new().expect("Failed to create media root");

        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.media.root = media.path().to_string_lossy().into_owned();

        let store = MemoryStore::new();
        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(media.path())
                .await
                .expect("Failed to init storage"),
        );

        let state =
            inkwell_api::AppState::new(config.clone(), Stores::memory(store.clone()), storage);
        let router = inkwell_api::build_app(state);

        Self {
            router,
            store,
            config,
            media,
        }
    }

    /// Absolute path of a file under the media root
    pub fn media_path(&self, relative: &str) -> std::path::PathBuf {
        self.media.path().join(relative)
    }

    /// Send a JSON request, optionally as `user`
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<Uuid>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = with_user(
            Request::builder()
                .method(method)
                .uri(path)
                .header("Content-Type", "application/json"),
            user,
            "member",
        )
        .body(Body::from(body_str))
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a JSON request as a staff member
    pub async fn request_as_staff(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Uuid,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = with_user(
            Request::builder()
                .method(method)
                .uri(path)
                .header("Content-Type", "application/json"),
            Some(user),
            "staff",
        )
        .body(Body::from(body_str))
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a multipart form, optionally as `user`
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        form: Multipart,
        user: Option<Uuid>,
    ) -> TestResponse {
        let req = with_user(
            Request::builder().method(method).uri(path).header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ),
            user,
            "member",
        )
        .body(Body::from(form.finish()))
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Publish an article through the API and return its ID
    pub async fn publish_article(&self, author: Uuid, title: &str) -> Uuid {
        self.create_article(author, title, "<p>Body</p>", "published")
            .await
    }

    /// Save a draft through the API and return its ID
    pub async fn draft_article(&self, author: Uuid, title: &str) -> Uuid {
        self.create_article(author, title, "<p>Body</p>", "draft")
            .await
    }

    /// Create an article with an explicit body and status
    pub async fn create_article(
        &self,
        author: Uuid,
        title: &str,
        content: &str,
        status: &str,
    ) -> Uuid {
        let form = Multipart::new()
            .text("title", title)
            .text("content", content)
            .text("status", status);
        let response = self.multipart("POST", "/api/articles", form, Some(author)).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Post a comment through the API and return its ID
    pub async fn comment(
        &self,
        user: Uuid,
        article_id: Uuid,
        content: &str,
        parent_id: Option<Uuid>,
    ) -> Uuid {
        let response = self
            .request(
                "POST",
                &format!("/api/articles/{article_id}/comments"),
                Some(serde_json::json!({ "content": content, "parent_id": parent_id })),
                Some(user),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

fn with_user(
    builder: axum::http::request::Builder,
    user: Option<Uuid>,
    role: &str,
) -> axum::http::request::Builder {
    match user {
        Some(id) => builder
            .header("x-user-id", id.to_string())
            .header("x-user-role", role),
        None => builder,
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `data.id` of a success envelope
    pub fn id(&self) -> Uuid {
        self.body["data"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("response has no data.id")
    }

    /// `data.items` of a paginated success envelope
    pub fn items(&self) -> &Vec<Value> {
        self.body["data"]["items"]
            .as_array()
            .expect("response has no data.items")
    }
}

/// Minimal `multipart/form-data` body builder
#[derive(Debug, Default)]
pub struct Multipart {
    body: Vec<u8>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Add a file field
    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

/// A solid-colour PNG of the given size
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([180, 40, 90]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    out.into_inner()
}

