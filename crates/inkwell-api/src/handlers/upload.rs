//! Rich-text editor upload callback.

use axum::Json;
use axum::extract::{Multipart, State};

use inkwell_core::error::AppError;

use super::{field_bytes, next_field};
use crate::dto::response::EditorUploadResponse;
use crate::error::EditorUploadError;
use crate::extractors::MaybeAuthUser;
use crate::state::AppState;

/// Multipart field the editor posts the file in.
const UPLOAD_FIELD: &str = "upload";

/// POST /api/uploads/editor
///
/// Replies `{ "url": ... }` on success and `{ "error": { "message": ... } }`
/// on failure, the shapes the editor's upload adapter understands.
pub async fn editor_upload(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    mut multipart: Multipart,
) -> Result<Json<EditorUploadResponse>, EditorUploadError> {
    let ctx = auth
        .context()
        .ok_or_else(|| AppError::authentication("Login required to upload images"))?;

    let mut upload = None;
    while let Some(field) = next_field(&mut multipart).await? {
        if field.name() == Some(UPLOAD_FIELD) {
            let file_name = field.file_name().unwrap_or_default().to_string();
            upload = Some((file_name, field_bytes(field).await?));
            break;
        }
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::validation("Invalid request or no file uploaded"))?;

    let stored = state
        .upload_service
        .upload_editor_image(ctx, &file_name, data)
        .await?;

    Ok(Json(EditorUploadResponse { url: stored.url }))
}
