//! Convenience result type alias for Inkwell.

use crate::error::AppError;

/// A specialized `Result` type for Inkwell operations.
pub type AppResult<T> = Result<T, AppError>;
