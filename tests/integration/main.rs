//! End-to-end tests against the HTTP API backed by the in-memory store.

mod helpers;

mod article_flow;
mod comment_flow;
mod media_flow;
mod notification_flow;
