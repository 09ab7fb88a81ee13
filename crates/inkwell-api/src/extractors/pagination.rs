//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use inkwell_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
///
/// Values are kept as text so a malformed `?page=abc` falls back to the
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based). Zero, negative, non-numeric, or missing means
    /// the first page.
    pub page: Option<String>,
    /// Items per page; the endpoint default applies when missing or invalid.
    pub per_page: Option<String>,
}

impl PaginationParams {
    /// The requested page, at least 1.
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1) as u64
    }

    /// The requested page size, or `default_per_page`.
    pub fn per_page(&self, default_per_page: u64) -> u64 {
        self.per_page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(default_per_page)
    }

    /// Converts to a `PageRequest` with `default_per_page` as fallback.
    pub fn into_page_request(self, default_per_page: u64) -> PageRequest {
        PageRequest::new(self.page(), self.per_page(default_per_page))
    }
}

/// Query parameters of the search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Text to look for in titles and bodies.
    #[serde(default)]
    pub q: String,
    /// Page selection.
    #[serde(flatten)]
    pub pagination: PaginationParams,
}
