//! Request handlers grouped by domain.

pub mod article;
pub mod category;
pub mod comment;
pub mod health;
pub mod notification;
pub mod profile;
pub mod upload;

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use bytes::Bytes;

use inkwell_core::error::AppError;

/// Next multipart field, with read errors mapped to validation errors.
pub(crate) async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>, AppError> {
    multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))
}

/// Read a text field.
pub(crate) async fn field_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}

/// Read a file field.
pub(crate) async fn field_bytes(field: Field<'_>) -> Result<Bytes, AppError> {
    field
        .bytes()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}
