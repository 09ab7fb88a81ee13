//! Article publishing, reading, and categories.

pub mod category;
pub mod service;

pub use category::{CategoryPage, CategoryService};
pub use service::{ArticleService, FeatureImage, HomePage, PublishArticleRequest};
