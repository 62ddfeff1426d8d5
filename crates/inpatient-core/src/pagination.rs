//! Pagination over the derived view.
//!
//! Pages are 1-based. A page past the end (or page 0) is not an error; it
//! produces an empty slice with the usual totals.

use serde::Serialize;

/// A page of items plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    /// Visible slice
    pub items: &'a [T],
    /// Requested page number (1-based)
    pub page: usize,
    /// Page size used to cut the slice
    pub page_size: usize,
    /// Items across all pages
    pub total_items: usize,
    /// `ceil(total_items / page_size)`, zero when there are no items
    pub total_pages: usize,
    /// 1-based index of the first visible item, 0 when the slice is empty
    pub start: usize,
    /// 1-based index of the last visible item, 0 when the slice is empty
    pub end: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Total pages for `total_items` at `page_size` per page.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Cut page `page` out of `items`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total_items = items.len();
    let slice: &[T] = match page.checked_sub(1).and_then(|p| p.checked_mul(page_size)) {
        Some(start) if start < total_items => {
            let end = start.saturating_add(page_size).min(total_items);
            &items[start..end]
        }
        _ => &[],
    };

    let (start, end) = if slice.is_empty() {
        (0, 0)
    } else {
        let first = (page - 1) * page_size + 1;
        (first, first + slice.len() - 1)
    };

    Page {
        items: slice,
        page,
        page_size,
        total_items,
        total_pages: total_pages(total_items, page_size),
        start,
        end,
    }
}

/// Page numbers to show in the navigation control.
///
/// A contiguous run of at most `max_visible` numbers, centred on `current`
/// when possible and shifted to stay inside `1..=total_pages`.
pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<usize> {
    if total_pages == 0 || max_visible == 0 {
        return Vec::new();
    }

    let current = current.min(total_pages);
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = start.saturating_add(max_visible - 1).min(total_pages);

    // start <= end here, so this cannot underflow.
    let shown = end - start + 1;
    if shown < max_visible {
        start = end.saturating_sub(max_visible - 1).max(1);
    }

    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_single_partial_page() {
        let items = numbers(8);
        let page = paginate(&items, 1, 10);
        assert_eq!(page.items.len(), 8);
        assert_eq!(page.total_items, 8);
        assert_eq!(page.total_pages, 1);
        assert_eq!((page.start, page.end), (1, 8));
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_last_page_is_clipped() {
        let items = numbers(25);
        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.start, page.end), (21, 25));
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items = numbers(25);
        let page = paginate(&items, 4, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_items, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.start, page.end), (0, 0));
    }

    #[test]
    fn test_page_zero_is_empty() {
        let items = numbers(5);
        let page = paginate(&items, 0, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_empty_view() {
        let items: Vec<usize> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!((page.start, page.end), (0, 0));
    }

    #[test]
    fn test_exact_multiple() {
        let items = numbers(20);
        assert_eq!(paginate(&items, 2, 10).items.len(), 10);
        assert_eq!(paginate(&items, 2, 10).total_pages, 2);
        assert!(paginate(&items, 3, 10).is_empty());
    }

    #[test]
    fn test_window_centres_on_current() {
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_window_clamps_at_edges() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(9, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_window_fewer_pages_than_slots() {
        assert_eq!(page_window(1, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(3, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(1, 0, 5), Vec::<usize>::new());
    }

    #[test]
    fn test_window_current_out_of_range() {
        assert_eq!(page_window(12, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(0, 7, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_huge_inputs_do_not_overflow() {
        assert_eq!(page_window(usize::MAX, 8, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(3, 8, usize::MAX), numbers(8));
        assert_eq!(page_window(usize::MAX, usize::MAX, 3), vec![usize::MAX - 2, usize::MAX - 1, usize::MAX]);
    }
}
