//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use inkwell_core::error::AppError;

/// New comment body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentBody {
    /// Comment text.
    #[validate(length(min = 1, max = 5000, message = "Comment must be 1 to 5000 characters"))]
    pub content: String,
    /// Comment being replied to.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// New category body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryBody {
    /// Display name; the slug is derived from it.
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
}

/// Moderation toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveBody {
    /// Whether the comment is visible.
    pub active: bool,
}

/// Run `validator` rules and turn failures into a validation error.
pub fn validate<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}
