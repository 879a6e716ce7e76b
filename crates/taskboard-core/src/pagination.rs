//! Generic page-number pagination.
//!
//! Pure data: knows which slice of a list belongs to a page, nothing about
//! rendering. Pages are 1-indexed to match what the filter store exposes.

/// Information about one page of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Indices of items on the current page.
    pub visible_indices: Vec<usize>,
    /// Current page number (1-indexed, clamped to the last page).
    pub current_page: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Count of items before this page.
    pub items_before: usize,
    /// Count of items after this page.
    pub items_after: usize,
}

impl PageInfo {
    /// Page info for an empty list.
    pub fn empty() -> Self {
        Self {
            visible_indices: vec![],
            current_page: 1,
            total_pages: 0,
            items_before: 0,
            items_after: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Requested page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        total_items.div_ceil(self.per_page)
    }

    /// Compute the page layout for a list of `total_items`.
    pub fn page_info(&self, total_items: usize) -> PageInfo {
        let total_pages = self.total_pages(total_items);
        if total_pages == 0 {
            return PageInfo::empty();
        }

        let current_page = self.page.min(total_pages);
        let start = (current_page - 1) * self.per_page;
        let end = (start + self.per_page).min(total_items);

        PageInfo {
            visible_indices: (start..end).collect(),
            current_page,
            total_pages,
            items_before: start,
            items_after: total_items - end,
        }
    }

    /// Borrow the items on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let info = self.page_info(items.len());
        match (info.visible_indices.first(), info.visible_indices.last()) {
            (Some(&first), Some(&last)) => &items[first..=last],
            _ => &[],
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 10)
    }
}
