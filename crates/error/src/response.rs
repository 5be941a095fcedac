//! # API Response Types
//!
//! Shared response building blocks for the MamaSouk API.
//!
//! ## Error Format
//!
//! ```json
//! {
//!   "success": false,
//!   "code": "NOT_FOUND",
//!   "message": "Product not found"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// JSON body for error responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Always `false` for errors.
    pub success: bool,
    /// Stable machine-readable error code.
    pub code:    String,
    /// Human-readable message, surfaced in client toasts.
    pub message: String,
}

impl ErrorBody {
    /// Create a new error body.
    #[must_use]
    pub fn new(code: &str, message: impl ToString) -> Self {
        Self {
            success: false,
            code:    code.to_string(),
            message: message.to_string(),
        }
    }
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PaginationMeta {
    /// Current page number (1-indexed).
    pub page: u64,

    /// Number of items per page.
    pub per_page: u64,

    /// Total number of items.
    pub total_items: u64,

    /// Total number of pages.
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Maximum allowed page number to prevent excessive offsets
    const MAX_PAGE: u64 = 1_000_000;

    /// Create pagination metadata with clamping.
    ///
    /// # Arguments
    ///
    /// * `page` - Page number (1-based)
    /// * `per_page` - Items per page
    /// * `total_items` - Total number of items
    ///
    /// Clamps `page` into `1..=MAX_PAGE`.
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let page = if page > Self::MAX_PAGE {
            tracing::warn!(page, max = Self::MAX_PAGE, "Page number clamped to max");
            Self::MAX_PAGE
        }
        else {
            page.max(1)
        };

        let total_pages = if per_page == 0 {
            0
        }
        else {
            total_items.div_ceil(per_page)
        };

        Self {
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    /// Calculate offset for database queries with overflow protection.
    ///
    /// Returns `None` if the offset calculation would overflow.
    pub fn offset(&self) -> Option<u64> { self.page.checked_sub(1)?.checked_mul(self.per_page) }

    /// Whether a page exists after the current one.
    pub fn has_next(&self) -> bool { self.page < self.total_pages }

    /// Whether a page exists before the current one.
    pub fn has_prev(&self) -> bool { self.page > 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::new("NOT_FOUND", "Product not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found");
    }

    #[test]
    fn test_pagination_basic() {
        let meta = PaginationMeta::new(2, 12, 30);
        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next());
        assert!(meta.has_prev());
    }

    #[test]
    fn test_pagination_exact_division() {
        let meta = PaginationMeta::new(1, 10, 30);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_prev());
    }

    #[test]
    fn test_pagination_empty() {
        let meta = PaginationMeta::new(1, 12, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next());
    }

    #[test]
    fn test_pagination_page_clamped_to_one() {
        let meta = PaginationMeta::new(0, 12, 100);
        assert_eq!(meta.page, 1);
    }

    #[test]
    fn test_pagination_page_clamped_to_max() {
        let meta = PaginationMeta::new(u64::MAX, 12, 100);
        assert_eq!(meta.page, PaginationMeta::MAX_PAGE);
    }

    #[test]
    fn test_offset() {
        let meta = PaginationMeta::new(3, 12, 100);
        assert_eq!(meta.offset(), Some(24));
    }

    #[test]
    fn test_offset_overflow_guard() {
        let meta = PaginationMeta {
            page:        u64::MAX,
            per_page:    u64::MAX,
            total_items: 0,
            total_pages: 0,
        };
        assert!(meta.offset().is_none());
    }

    #[test]
    fn test_pagination_zero_per_page() {
        let meta = PaginationMeta::new(1, 0, 50);
        assert_eq!(meta.total_pages, 0);
    }
}
