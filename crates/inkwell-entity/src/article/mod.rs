//! Article domain entities.

pub mod model;
pub mod query;
pub mod slug;
pub mod status;

pub use model::{Article, Category, CategorySummary, NewArticle};
pub use query::{ArticleFilter, ArticleOrder};
pub use slug::slugify;
pub use status::ArticleStatus;
