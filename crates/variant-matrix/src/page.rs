//! Visible set pagination
//!
//! Pages are zero-based. There is always at least one page, even when the
//! list is empty, and out-of-range requests land on the last page.

/// One page of a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// Zero-based page actually returned
    pub page: usize,
    /// Page size after clamping to at least 1
    pub per_page: usize,
    /// Length of the whole list
    pub total_items: usize,
    /// Page count, never zero
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// Whether a following page exists
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Whether a preceding page exists
    #[inline]
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }
}

/// Slice `items` into the requested page
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page).max(1);
    let page = page.min(total_pages - 1);
    let start = (page * per_page).min(items.len());
    let end = (start + per_page).min(items.len());

    Page {
        items: &items[start..end],
        page,
        per_page,
        total_items: items.len(),
        total_pages,
    }
}
