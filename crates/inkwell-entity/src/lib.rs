//! # inkwell-entity
//!
//! Domain entity models for Inkwell. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod article;
pub mod comment;
pub mod notification;
pub mod profile;
pub mod user;
