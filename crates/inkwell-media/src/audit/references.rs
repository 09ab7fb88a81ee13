//! Media URLs embedded in rich-text article bodies.

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize_reference;

static IMG_SRC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).expect("valid img src regex")
});

/// Extracts media-root paths from `<img src="...">` tags.
#[derive(Debug, Clone)]
pub struct EmbeddedImageMatcher {
    url_prefix: String,
}

impl EmbeddedImageMatcher {
    /// Match sources that start with `url_prefix` (e.g. `/media/`).
    pub fn new(url_prefix: &str) -> Self {
        Self {
            url_prefix: url_prefix.to_string(),
        }
    }

    /// Root-relative paths of every local image embedded in `html`.
    pub fn extract(&self, html: &str) -> Vec<String> {
        IMG_SRC_REGEX
            .captures_iter(html)
            .filter_map(|caps| caps.get(1))
            .filter_map(|src| src.as_str().strip_prefix(&self.url_prefix))
            .map(|rest| {
                let path = rest.split(['?', '#']).next().unwrap_or(rest);
                normalize_reference(path)
            })
            .filter(|path| !path.is_empty())
            .collect()
    }
}
