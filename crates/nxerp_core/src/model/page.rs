//! Paged listing request and result envelopes.
//!
//! # Invariants
//! - Normalized page number is >= 1 and normalized page size is >= 10.
//! - `total_pages` is derived from `total_count` and `page_size`, never stored.

use serde::{Deserialize, Serialize};

/// Smallest page size a caller may request; smaller values are raised to it.
pub const MIN_PAGE_SIZE: u32 = 10;

/// Paged listing request with optional substring search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// Search text. Blank or whitespace-only means "no filter".
    pub search: Option<String>,
    /// 1-based page number. `0` is treated as `1`.
    pub page_number: u32,
    /// Requested rows per page. Values below [`MIN_PAGE_SIZE`] are raised.
    pub page_size: u32,
}

impl PageQuery {
    /// Creates an unfiltered request.
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            search: None,
            page_number,
            page_size,
        }
    }

    /// Sets the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns a copy with page bounds normalized and search trimmed
    /// (`None` when blank).
    pub fn normalized(&self) -> Self {
        Self {
            search: self.search_term().map(str::to_string),
            page_number: self.page_number.max(1),
            page_size: self.page_size.max(MIN_PAGE_SIZE),
        }
    }

    /// Trimmed search term, `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Row offset of the normalized page: `(page_number - 1) * page_size`.
    ///
    /// Saturates instead of overflowing for absurd page numbers; such pages
    /// are simply empty.
    pub fn offset(&self) -> u64 {
        let normalized = self.normalized();
        u64::from(normalized.page_number - 1).saturating_mul(u64::from(normalized.page_size))
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(1, MIN_PAGE_SIZE)
    }
}

/// One page of an ordered result set plus derived paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows of this page, most recently modified first.
    pub items: Vec<T>,
    /// Number of rows matching the filter, ignoring pagination.
    pub total_count: u64,
    /// Normalized page number that was served.
    pub page_number: u32,
    /// Normalized page size that was served.
    pub page_size: u32,
}

impl<T> Page<T> {
    /// `max(1, ceil(total_count / page_size))`.
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = self.total_count.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether the served page lies past the last page.
    pub fn is_past_end(&self) -> bool {
        self.page_number > self.total_pages()
    }
}
