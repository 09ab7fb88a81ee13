//! URL slug generation.

/// Turn a title into a lowercase, hyphen-separated slug.
///
/// Alphanumeric characters (Unicode included) are kept, whitespace,
/// hyphens, and underscores collapse into single hyphens, everything else
/// is dropped. A title with nothing usable yields `"article"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        "article".to_string()
    } else {
        slug
    }
}
