//! Pagination and the page-selector window.
//!
//! [`paginate`] never clamps: a page past the end yields an empty slice and
//! the caller decides how to correct it (see [`clamp_page`]).
//! [`compute_window`] is a pure function of `(current, total)`.

use serde::Serialize;

/// A page of items plus the total page count of the full collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

/// Number of pages needed for `len` items, never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice out 1-based page `current_page` of `items`.
///
/// Page 0 is treated as page 1; a zero page size as 1.
pub fn paginate<T>(items: &[T], page_size: usize, current_page: usize) -> PageSlice<'_, T> {
    let size = page_size.max(1);
    let page = current_page.max(1);
    let start = (page - 1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    PageSlice {
        items: &items[start..end],
        total_pages: total_pages(items.len(), size),
    }
}

/// Clamp `current` into `[1, max(1, total)]`.
pub fn clamp_page(current: usize, total: usize) -> usize {
    current.clamp(1, total.max(1))
}

/// One entry of the page selector.
///
/// Serializes as a bare page number or the string `"..."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageToken::Page(n) => serializer.serialize_u64(*n as u64),
            PageToken::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Page-selector tokens for `current` of `total` pages.
///
/// Always shows page 1 and `total`, plus `current - 1 ..= current + 1`
/// inside `[2, total - 1]`, with an ellipsis where pages are skipped.
/// Empty when there is at most one page.
pub fn compute_window(current: usize, total: usize) -> Vec<PageToken> {
    if total <= 1 {
        return Vec::new();
    }

    let mut tokens = vec![PageToken::Page(1)];
    if current > 3 {
        tokens.push(PageToken::Ellipsis);
    }

    let lo = current.saturating_sub(1).max(2);
    let hi = current.saturating_add(1).min(total - 1);
    tokens.extend((lo..=hi).map(PageToken::Page));

    if current + 2 < total {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.push(PageToken::Page(total));
    tokens
}

/// Everything a page control needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub current: usize,
    pub total: usize,
    pub window: Vec<PageToken>,
}

impl Pager {
    pub fn new(current: usize, total: usize) -> Self {
        Self {
            current,
            total,
            window: compute_window(current, total),
        }
    }

    /// Whether the control is shown at all.
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Target of the "previous" button.
    pub fn prev(&self) -> usize {
        self.current.saturating_sub(1).max(1)
    }

    /// Target of the "next" button.
    pub fn next(&self) -> usize {
        (self.current + 1).min(self.total.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageToken::{Ellipsis, Page};

    #[test]
    fn test_23_items_page_size_9() {
        let items: Vec<u32> = (0..23).collect();
        let p3 = paginate(&items, 9, 3);
        assert_eq!(p3.total_pages, 3);
        assert_eq!(p3.items, &[18, 19, 20, 21, 22]);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let p = paginate(&items, 9, 1);
        assert_eq!(p.total_pages, 1);
        assert!(p.items.is_empty());
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_clamped() {
        let items: Vec<u32> = (0..5).collect();
        let p = paginate(&items, 2, 9);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_coverage_reconstructs_items() {
        for len in [0usize, 1, 8, 9, 10, 23, 27] {
            for size in [1usize, 4, 9, 10] {
                let items: Vec<usize> = (0..len).collect();
                let total = paginate(&items, size, 1).total_pages;
                let joined: Vec<usize> = (1..=total)
                    .flat_map(|p| paginate(&items, size, p).items.to_vec())
                    .collect();
                assert_eq!(joined, items, "len={} size={}", len, size);
            }
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(7, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn test_window_middle() {
        assert_eq!(
            compute_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_edges() {
        assert!(compute_window(1, 1).is_empty());
        assert!(compute_window(1, 0).is_empty());
        assert_eq!(compute_window(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(compute_window(1, 10), vec![Page(1), Page(2), Ellipsis, Page(10)]);
        assert_eq!(compute_window(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
        assert_eq!(
            compute_window(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_window_bounds_property() {
        for total in 2..=15 {
            for current in 1..=total {
                let w = compute_window(current, total);
                assert_eq!(w.first(), Some(&Page(1)));
                assert_eq!(w.last(), Some(&Page(total)));
                for t in &w {
                    if let Page(n) = t {
                        assert!(*n >= 1 && *n <= total);
                    }
                }
                assert!(w.contains(&Page(current)));
            }
        }
    }

    #[test]
    fn test_window_serializes_ellipsis_as_string() {
        let json = serde_json::to_string(&compute_window(5, 10)).unwrap();
        assert_eq!(json, r#"[1,"...",4,5,6,"...",10]"#);
    }

    #[test]
    fn test_pager_buttons() {
        let first = Pager::new(1, 4);
        assert!(!first.has_prev());
        assert!(first.has_next());
        assert_eq!(first.prev(), 1);
        assert_eq!(first.next(), 2);

        let last = Pager::new(4, 4);
        assert!(!last.has_next());
        assert_eq!(last.next(), 4);
        assert!(!Pager::new(1, 1).is_visible());
    }
}
