//! Page-size normalisation and the "has next page" rule used by the
//! smart-content listing.
//!
//! Lives in `core` so both the repository layer and the provider share a
//! single definition of how `limit`, `page` and `page_size` combine.

/// Page size substituted when none (or an oversized one) is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Effective page size: `None`, `0` and anything above
/// [`DEFAULT_PAGE_SIZE`] fall back to the default.
pub fn effective_page_size(page_size: Option<u32>) -> u32 {
    match page_size {
        Some(size) if size > 0 && size <= DEFAULT_PAGE_SIZE => size,
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// Pages are 1-based; `0` is treated as the first page.
pub fn normalize_page(page: u32) -> u32 {
    page.max(1)
}

/// Requested slice of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingOptions {
    /// Upper bound on the total number of visible results.
    pub limit: Option<u64>,
    /// 1-based page number.
    pub page: u32,
    pub page_size: Option<u32>,
}

impl Default for PagingOptions {
    fn default() -> Self {
        Self {
            limit: None,
            page: 1,
            page_size: None,
        }
    }
}

/// A zero limit means "no limit".
fn active_limit(limit: Option<u64>) -> Option<u64> {
    limit.filter(|limit| *limit > 0)
}

/// Whether another page of results exists after `page`.
///
/// A set `limit` caps the visible results: once the current page reaches
/// past it there is no next page, whatever `count` says. Otherwise the
/// answer is whether more than `page * page_size` records match.
///
/// # Examples
///
/// ```
/// use abbreviations_core::pagination::has_next_page;
/// assert!(has_next_page(25, None, 2, Some(12)));
/// assert!(!has_next_page(25, None, 3, Some(12)));
/// assert!(!has_next_page(100, Some(20), 2, Some(12)));
/// ```
pub fn has_next_page(count: u64, limit: Option<u64>, page: u32, page_size: Option<u32>) -> bool {
    let page_size = u64::from(effective_page_size(page_size));
    let page = u64::from(normalize_page(page));

    let offset = (page - 1).saturating_mul(page_size);
    if let Some(limit) = active_limit(limit) {
        if offset.saturating_add(page_size) > limit {
            return false;
        }
    }

    count > page.saturating_mul(page_size)
}

/// The slice of rows a repository should fetch for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub fetch: u64,
}

/// Compute the row window for `page`, shortened so it never reaches past
/// `limit`. Returns `None` when the page starts at or beyond the limit.
pub fn page_window(page: u32, page_size: Option<u32>, limit: Option<u64>) -> Option<PageWindow> {
    let page_size = u64::from(effective_page_size(page_size));
    let page = u64::from(normalize_page(page));
    let offset = (page - 1).saturating_mul(page_size);

    let fetch = match active_limit(limit) {
        Some(limit) if offset >= limit => return None,
        Some(limit) => page_size.min(limit - offset),
        None => page_size,
    };

    Some(PageWindow { offset, fetch })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
