//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Public profile attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// The owning user.
    pub user_id: Uuid,
    /// Display name.
    pub nickname: String,
    /// Free-form biography.
    pub bio: String,
    /// Profile picture path relative to the media root.
    pub image: String,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A crop rectangle in source-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl CropRect {
    /// Build a rectangle only when every coordinate was supplied.
    pub fn from_parts(
        x: Option<f64>,
        y: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Option<Self> {
        Some(Self {
            x: x?,
            y: y?,
            width: width?,
            height: height?,
        })
    }
}
