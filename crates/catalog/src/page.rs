//! Pagination metadata.
//!
//! Combines the remote total count with the requested page window. A
//! zero-result set still reports one page with zero items so the UI can
//! render a "0 of 0" range instead of special-casing emptiness.

/// Page metadata derived from a total count and a page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    /// Total matching items across all pages.
    pub total_count: u64,
    /// Current page, clamped into `[1, total_pages]`.
    pub current_page: u32,
    /// `max(ceil(total_count / page_size), 1)`.
    pub total_pages: u32,
    /// First item index shown, 1-based.
    pub start: u64,
    /// Last item index shown, 1-based. `start > end` only when empty.
    pub end: u64,
}

impl PageMeta {
    /// "Showing X-Y of Z" range text; "0 of 0" when there are no items.
    #[must_use]
    pub fn range_label(&self) -> String {
        if self.total_count == 0 {
            "0 of 0".to_string()
        } else {
            format!("{}-{} of {}", self.start, self.end, self.total_count)
        }
    }
}

/// Compute page metadata.
///
/// A `requested_page` past the end is clamped to the last page rather
/// than treated as an error. `page_size` below 1 is treated as 1.
#[must_use]
pub fn paginate(total_count: u64, requested_page: u32, page_size: u32) -> PageMeta {
    let page_size = u64::from(page_size.max(1));
    let total_pages = total_count
        .div_ceil(page_size)
        .max(1)
        .try_into()
        .unwrap_or(u32::MAX);

    let current_page = requested_page.clamp(1, total_pages);
    let start = (u64::from(current_page) - 1) * page_size + 1;
    let end = (u64::from(current_page) * page_size).min(total_count);

    PageMeta {
        total_count,
        current_page,
        total_pages,
        start,
        end,
    }
}
