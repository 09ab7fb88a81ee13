//! Core type definitions used across the Inkwell workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
