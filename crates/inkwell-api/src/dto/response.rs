//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A bare count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// The count.
    pub count: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when every dependency answered.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Blob storage backend and whether it is reachable.
    pub storage: String,
}

/// Editor upload success body: `{ "url": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorUploadResponse {
    /// Public URL of the stored image.
    pub url: String,
}
