//! Core traits defined in `inkwell-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
