//! Page-number pagination with clamping.
//!
//! Requests never fail on a bad page number: anything unparseable or below 1
//! becomes page 1, and anything past the end becomes the last page. An empty
//! result set still has one (empty) page.

use serde::Serialize;

/// Number of items per page on public listings.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Parse a raw `?page=` value. Missing or malformed input yields page 1.
pub fn parse_page_param(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// A resolved page within a result set of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    /// 1-based page number after clamping.
    pub number: i64,
    /// Total number of pages (at least 1).
    pub total_pages: i64,
    /// Total number of items across all pages.
    pub count: i64,
    /// Page size used for the computation.
    #[serde(skip)]
    pub page_size: i64,
}

impl Page {
    /// Resolve `requested` against `count` items split into `page_size` pages.
    pub fn resolve(requested: i64, count: i64, page_size: i64) -> Self {
        let page_size = page_size.max(1);
        let count = count.max(0);
        let total_pages = if count == 0 {
            1
        } else {
            (count + page_size - 1) / page_size
        };
        let number = requested.clamp(1, total_pages);
        Self {
            number,
            total_pages,
            count,
            page_size,
        }
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.page_size
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}
