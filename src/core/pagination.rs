//! Client-side pagination over an already fetched list

/// Page sizes offered by the explorer's per-page selector
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` items. Zero for an empty list.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// The slice of `items` shown on 1-based `page`.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to page 1. Called whenever the underlying list is replaced.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Advance to the next entry of [`PAGE_SIZE_OPTIONS`], wrapping around.
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .position(|size| *size == self.page_size)
            .map(|idx| PAGE_SIZE_OPTIONS[(idx + 1) % PAGE_SIZE_OPTIONS.len()])
            .unwrap_or(DEFAULT_PAGE_SIZE);
        self.set_page_size(next);
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.page, self.page_size)
    }

    /// Absolute index of the first item on the current page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        let total = self.total_pages(len);
        total != 0 && self.page < total
    }

    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn next(&mut self, len: usize) {
        let last = self.total_pages(len).max(1);
        self.page = (self.page + 1).min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_len(len: usize, page: usize, size: usize) -> usize {
        size.min(len.saturating_sub((page - 1) * size))
    }

    #[test]
    fn test_page_slice_matches_range() {
        let items: Vec<u32> = (0..23).collect();
        for size in [1, 5, 10, 20, 50] {
            for page in 1..=6 {
                let slice = page_slice(&items, page, size);
                assert_eq!(slice.len(), expected_len(items.len(), page, size));
                let start = (page - 1) * size;
                if !slice.is_empty() {
                    assert_eq!(slice, &items[start..start + slice.len()]);
                }
            }
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(150, 50), 3);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut pagination = Pagination::new(5);
        pagination.next(30);
        pagination.next(30);
        assert_eq!(pagination.page(), 3);

        pagination.set_page_size(20);
        assert_eq!(pagination.page(), 1);

        pagination.next(30);
        pagination.cycle_page_size();
        assert_eq!(pagination.page_size(), 50);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut pagination = Pagination::new(50);
        pagination.cycle_page_size();
        assert_eq!(pagination.page_size(), 5);
    }

    #[test]
    fn test_boundaries() {
        let mut pagination = Pagination::new(10);
        let len = 25;
        assert!(!pagination.has_previous());
        assert!(pagination.has_next(len));

        pagination.previous();
        assert_eq!(pagination.page(), 1);

        pagination.next(len);
        pagination.next(len);
        assert_eq!(pagination.page(), 3);
        assert!(!pagination.has_next(len));
        pagination.next(len);
        assert_eq!(pagination.page(), 3);
        assert!(pagination.has_previous());
        assert_eq!(pagination.visible(&(0..len).collect::<Vec<_>>()), &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_empty_list_is_inert() {
        let mut pagination = Pagination::default();
        assert_eq!(pagination.total_pages(0), 0);
        assert!(!pagination.has_previous());
        assert!(!pagination.has_next(0));
        pagination.next(0);
        assert_eq!(pagination.page(), 1);
        assert!(pagination.visible::<u8>(&[]).is_empty());
    }
}
