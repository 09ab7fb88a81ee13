//! Article publication status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an article is visible to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "article_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// Work in progress, only visible to the author.
    #[default]
    Draft,
    /// Publicly listed.
    Published,
}

impl ArticleStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = inkwell_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(inkwell_core::AppError::validation(format!(
                "Invalid article status: '{s}'. Expected one of: draft, published"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Published".parse::<ArticleStatus>().unwrap(),
            ArticleStatus::Published
        );
        assert!("archived".parse::<ArticleStatus>().is_err());
    }
}
