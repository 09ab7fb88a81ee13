//! # inkwell-media
//!
//! Everything that touches media bytes: the local blob store, the image
//! normalizer (compress, crop-and-resize, post-save shrink), and the
//! filesystem half of the media reference audit.

pub mod audit;
pub mod normalizer;
pub mod providers;

pub use normalizer::ImageNormalizer;
pub use providers::local::LocalStorageProvider;
