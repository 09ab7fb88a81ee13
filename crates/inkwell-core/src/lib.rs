//! # inkwell-core
//!
//! Core crate for Inkwell. Contains configuration schemas, pagination
//! types, the blob storage trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Inkwell crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
