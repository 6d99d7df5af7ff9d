//! Listing controller: owns the query state of one listing page.
//!
//! The controller holds four state variables (search text, category filter,
//! sort order, current page) plus the loaded collection. Every derived value
//! is recomputed explicitly in dependency order when [`ListingController::view`]
//! is called, and only when its own inputs changed:
//!
//! | Stage | Recomputed when |
//! |-------|-----------------|
//! | facets | collection revision changes |
//! | query result | revision or query descriptor changes |
//! | page slice | always (a slice, no copying) |
//!
//! Search and filter changes reset the page to 1; sort changes do not.

use crate::facets::FacetCache;
use crate::grid::{grid_view, GridView};
use crate::models::{CategoryFilter, Listable, LoadState, LoadStatus, QueryDescriptor, SortOrder};
use crate::paginate::{clamp_page, paginate, Pager};
use crate::query::apply_query;

/// Cards per page on public listings.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Single-entry memo: keeps the last value and the key that produced it.
#[derive(Debug)]
pub struct Memo<K, V> {
    key: Option<K>,
    value: Option<V>,
    misses: usize,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            key: None,
            value: None,
            misses: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Return the cached value for `key`, running `compute` on a miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.key.as_ref() != Some(&key) {
            self.value = None;
            self.key = Some(key);
        }
        let misses = &mut self.misses;
        self.value.get_or_insert_with(|| {
            *misses += 1;
            compute()
        })
    }

    /// Number of times the value was computed.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Derived state for one render of a listing page.
#[derive(Debug)]
pub struct ListingView<'a, T> {
    pub status: LoadStatus,
    pub error: Option<&'a str>,
    pub query: &'a QueryDescriptor,
    pub facets: &'a [String],
    /// Size of the whole collection.
    pub total_count: usize,
    /// Size after filtering, before pagination.
    pub filtered_count: usize,
    pub page_items: &'a [T],
    pub pager: Pager,
    pub grid: GridView<'a, T>,
}

/// State machine behind a listing page.
#[derive(Debug)]
pub struct ListingController<T> {
    source: LoadState<Vec<T>>,
    revision: u64,
    query: QueryDescriptor,
    current_page: usize,
    page_size: usize,
    empty_message: String,
    facets: FacetCache,
    results: Memo<(u64, QueryDescriptor), Vec<T>>,
}

impl<T: Listable + Clone> ListingController<T> {
    pub fn new(page_size: usize, empty_message: impl Into<String>) -> Self {
        Self {
            source: LoadState::Pending,
            revision: 0,
            query: QueryDescriptor::default(),
            current_page: 1,
            page_size: page_size.max(1),
            empty_message: empty_message.into(),
            facets: FacetCache::new(),
            results: Memo::default(),
        }
    }

    /// Replace the collection with a fresh snapshot (or a pending/failed state).
    pub fn load(&mut self, source: LoadState<Vec<T>>) {
        self.source = source;
        self.revision += 1;
    }

    pub fn status(&self) -> LoadStatus {
        self.source.status()
    }

    pub fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
        self.current_page = 1;
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.query.filter = filter;
        self.current_page = 1;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.query.sort_order = order;
    }

    /// Set the page directly. Out-of-range values are clamped by the next
    /// [`view`](Self::view).
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Reset search, filter and page. Sort order is kept.
    pub fn clear_filters(&mut self) {
        self.query.search_text.clear();
        self.query.filter = CategoryFilter::All;
        self.current_page = 1;
    }

    /// Facet recomputation count, for auditing memo behavior.
    pub fn facet_recomputes(&self) -> usize {
        self.facets.recomputes()
    }

    /// Query reducer run count, for auditing memo behavior.
    pub fn query_runs(&self) -> usize {
        self.results.misses()
    }

    /// Compute everything a listing page renders.
    ///
    /// A collection that is still pending or failed is treated as empty.
    pub fn view(&mut self) -> ListingView<'_, T> {
        let entities: &[T] = match &self.source {
            LoadState::Resolved(items) => items,
            LoadState::Pending | LoadState::Failed(_) => &[],
        };

        let facets = self.facets.get(self.revision, entities);

        let key = (self.revision, self.query.clone());
        let query = &self.query;
        let results = self
            .results
            .get_or_compute(key, || apply_query(entities, query));

        let slice = paginate(results, self.page_size, self.current_page);
        let page = clamp_page(self.current_page, slice.total_pages);
        let slice = if page == self.current_page {
            slice
        } else {
            paginate(results, self.page_size, page)
        };
        self.current_page = page;

        ListingView {
            status: self.source.status(),
            error: self.source.error(),
            query: &self.query,
            facets,
            total_count: entities.len(),
            filtered_count: results.len(),
            page_items: slice.items,
            pager: Pager::new(page, slice.total_pages),
            grid: grid_view(slice.items, &self.empty_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Accelerator, EntityId};

    fn acc(id: i64, city: &str, year: i64) -> Accelerator {
        Accelerator {
            id: EntityId::Number(id),
            name: format!("{} Accelerator {}", city, id),
            description: String::new(),
            city: Some(city.to_string()),
            founded_year: Some(year),
            website: None,
            logo: None,
        }
    }

    fn loaded(n: i64) -> ListingController<Accelerator> {
        let items = (1..=n)
            .map(|i| acc(i, if i % 2 == 0 { "Oran" } else { "Algiers" }, 2000 + i))
            .collect();
        let mut c = ListingController::new(DEFAULT_PAGE_SIZE, "No accelerators found");
        c.load(LoadState::Resolved(items));
        c
    }

    #[test]
    fn test_pending_renders_empty() {
        let mut c: ListingController<Accelerator> = ListingController::new(9, "none");
        let view = c.view();
        assert_eq!(view.status, LoadStatus::Pending);
        assert_eq!(view.total_count, 0);
        assert!(view.grid.is_empty());
        assert!(!view.pager.is_visible());
    }

    #[test]
    fn test_failed_load_exposes_error() {
        let mut c: ListingController<Accelerator> = ListingController::new(9, "none");
        c.load(LoadState::Failed("connection refused".to_string()));
        let view = c.view();
        assert_eq!(view.status, LoadStatus::Failed);
        assert_eq!(view.error, Some("connection refused"));
        assert!(view.page_items.is_empty());
    }

    #[test]
    fn test_23_items_three_pages() {
        let mut c = loaded(23);
        c.set_current_page(3);
        let view = c.view();
        assert_eq!(view.pager.total, 3);
        assert_eq!(view.page_items.len(), 5);
        assert_eq!(view.filtered_count, 23);
    }

    #[test]
    fn test_search_and_filter_reset_page() {
        let mut c = loaded(30);
        c.set_current_page(3);
        c.set_search_text("accelerator");
        assert_eq!(c.current_page(), 1);

        c.set_current_page(2);
        c.set_category_filter(CategoryFilter::Only("Oran".to_string()));
        assert_eq!(c.current_page(), 1);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut c = loaded(30);
        c.set_current_page(2);
        c.set_sort_order(SortOrder::Asc);
        assert_eq!(c.current_page(), 2);
        let view = c.view();
        assert_eq!(view.pager.current, 2);
        assert_eq!(view.page_items[0].founded_year, Some(2010));
    }

    #[test]
    fn test_stale_page_clamped_on_view() {
        let mut c = loaded(30);
        c.set_current_page(4);
        c.set_sort_order(SortOrder::Desc);
        c.load(LoadState::Resolved(vec![acc(1, "Oran", 2020)]));
        let view = c.view();
        assert_eq!(view.pager.current, 1);
        assert_eq!(view.page_items.len(), 1);
        assert_eq!(c.current_page(), 1);
    }

    #[test]
    fn test_clear_filters_keeps_sort() {
        let mut c = loaded(10);
        c.set_sort_order(SortOrder::Asc);
        c.set_search_text("nothing matches this");
        c.set_category_filter(CategoryFilter::Only("Oran".to_string()));
        assert!(c.view().grid.is_empty());

        c.clear_filters();
        let view = c.view();
        assert_eq!(view.filtered_count, 10);
        assert_eq!(view.query.sort_order, SortOrder::Asc);
        assert_eq!(view.query.filter, CategoryFilter::All);
    }

    #[test]
    fn test_memoization_tracks_declared_inputs() {
        let mut c = loaded(12);
        c.view();
        c.view();
        assert_eq!(c.facet_recomputes(), 1);
        assert_eq!(c.query_runs(), 1);

        // page change: neither facets nor query rerun
        c.set_current_page(2);
        c.view();
        assert_eq!(c.query_runs(), 1);

        // query change: query reruns, facets do not
        c.set_search_text("oran");
        c.view();
        assert_eq!(c.facet_recomputes(), 1);
        assert_eq!(c.query_runs(), 2);

        // new snapshot: both rerun
        c.load(LoadState::Resolved(vec![acc(1, "Setif", 2001)]));
        let view = c.view();
        assert_eq!(view.facets, ["Setif".to_string()]);
        assert_eq!(c.facet_recomputes(), 2);
        assert_eq!(c.query_runs(), 3);
    }

    #[test]
    fn test_facets_and_counts() {
        let mut c = loaded(5);
        c.set_category_filter(CategoryFilter::Only("Oran".to_string()));
        let view = c.view();
        assert_eq!(view.facets, ["Algiers".to_string(), "Oran".to_string()]);
        assert_eq!(view.total_count, 5);
        assert_eq!(view.filtered_count, 2);
    }

    #[test]
    fn test_memo_hits_on_equal_key() {
        let mut memo: Memo<u32, String> = Memo::default();
        assert_eq!(memo.get_or_compute(1, || "a".into()), "a");
        assert_eq!(memo.get_or_compute(1, || "b".into()), "a");
        assert_eq!(memo.get_or_compute(2, || "c".into()), "c");
        assert_eq!(memo.misses(), 2);
    }
}
