//! Query reducer: categorical filter, text filter, stable sort.
//!
//! The three steps always run in this order:
//!
//! 1. Keep entities whose categorical value equals the filter exactly
//!    (skipped for [`CategoryFilter::All`]).
//! 2. Keep entities whose name, description or categorical value contains the
//!    trimmed, lower-cased search text (OR across fields).
//! 3. Stable sort on the ordering value. Missing values sort as minimal, so
//!    they come last in descending order and first in ascending order.
//!
//! Equal ordering values keep their upstream relative order in both
//! directions.

use std::cmp::Ordering;

use crate::models::{CategoryFilter, Listable, QueryDescriptor, SortOrder};

/// Normalized search text: trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNeedle(String);

impl SearchNeedle {
    pub fn new(raw: &str) -> Self {
        SearchNeedle(raw.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test against `haystack`.
    pub fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }
}

/// Whether `entity` passes the categorical filter.
pub fn matches_filter<T: Listable>(entity: &T, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Only(wanted) => entity.category() == Some(wanted.as_str()),
    }
}

/// Whether `entity` matches a non-empty needle on any searchable field.
pub fn matches_search<T: Listable>(entity: &T, needle: &SearchNeedle) -> bool {
    if needle.is_empty() {
        return true;
    }
    needle.found_in(entity.name())
        || needle.found_in(entity.description())
        || entity.category().is_some_and(|c| needle.found_in(c))
}

/// Compare two entities by ordering value for the given direction.
pub fn compare_ordering<T: Listable>(a: &T, b: &T, order: SortOrder) -> Ordering {
    let ka = a.ordering_value().unwrap_or(i64::MIN);
    let kb = b.ordering_value().unwrap_or(i64::MIN);
    match order {
        SortOrder::Asc => ka.cmp(&kb),
        SortOrder::Desc => kb.cmp(&ka),
    }
}

/// Apply `query` to `entities`, returning the filtered and sorted result.
pub fn apply_query<T: Listable + Clone>(entities: &[T], query: &QueryDescriptor) -> Vec<T> {
    let needle = SearchNeedle::new(&query.search_text);

    let mut result: Vec<T> = entities
        .iter()
        .filter(|e| matches_filter(*e, &query.filter))
        .filter(|e| matches_search(*e, &needle))
        .cloned()
        .collect();

    // slice::sort_by is stable
    result.sort_by(|a, b| compare_ordering(a, b, query.sort_order));
    result
}
