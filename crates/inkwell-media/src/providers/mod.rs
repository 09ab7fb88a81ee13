//! Blob storage providers.

pub mod local;
