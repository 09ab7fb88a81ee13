//! Profile picture handler.

use axum::Json;
use axum::extract::{Multipart, State};
use bytes::Bytes;

use inkwell_core::error::AppError;
use inkwell_entity::profile::{CropRect, Profile};

use super::{field_bytes, field_text, next_field};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// PUT /api/profile/image
///
/// Multipart fields: `image` (file) and optionally `x`, `y`, `width`,
/// `height`. The crop applies only when all four are present.
pub async fn update_profile_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let mut data: Option<Bytes> = None;
    let (mut x, mut y, mut width, mut height) = (None, None, None, None);

    while let Some(field) = next_field(&mut multipart).await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => data = Some(field_bytes(field).await?),
            "x" => x = parse_coordinate(&name, &field_text(field).await?)?,
            "y" => y = parse_coordinate(&name, &field_text(field).await?)?,
            "width" => width = parse_coordinate(&name, &field_text(field).await?)?,
            "height" => height = parse_coordinate(&name, &field_text(field).await?)?,
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::validation("No image uploaded"))?;
    let crop = CropRect::from_parts(x, y, width, height);

    let profile = state
        .profile_image_service
        .replace(&auth, data, crop)
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// Blank means "not supplied".
fn parse_coordinate(name: &str, raw: &str) -> Result<Option<f64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| AppError::validation(format!("Invalid crop coordinate {name}: '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("x", " 12.5 ").unwrap(), Some(12.5));
        assert_eq!(parse_coordinate("x", "").unwrap(), None);
        assert!(parse_coordinate("x", "left").is_err());
    }
}
