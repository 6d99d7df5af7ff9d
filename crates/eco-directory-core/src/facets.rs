//! Facet extraction: the distinct values of the categorical field.
//!
//! Facets feed the filter dropdown. They depend only on the collection, so
//! [`FacetCache`] keeps the last result keyed on the collection revision and
//! skips the sort on every keystroke.

use std::collections::BTreeSet;

use crate::models::Listable;

/// Distinct, non-empty categorical values in ascending byte order.
pub fn extract_facets<T: Listable>(entities: &[T]) -> Vec<String> {
    entities
        .iter()
        .filter_map(|e| e.category())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Memoized [`extract_facets`], keyed on a collection revision number.
#[derive(Debug, Default)]
pub struct FacetCache {
    revision: Option<u64>,
    values: Vec<String>,
    recomputes: usize,
}

impl FacetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return facets for `entities`, recomputing only when `revision` differs
    /// from the one cached.
    pub fn get<T: Listable>(&mut self, revision: u64, entities: &[T]) -> &[String] {
        if self.revision != Some(revision) {
            self.values = extract_facets(entities);
            self.revision = Some(revision);
            self.recomputes += 1;
        }
        &self.values
    }

    /// How many times the facets were actually recomputed.
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Accelerator, EntityId};

    fn acc(id: i64, city: Option<&str>) -> Accelerator {
        Accelerator {
            id: EntityId::Number(id),
            name: format!("acc-{}", id),
            description: String::new(),
            city: city.map(str::to_string),
            founded_year: None,
            website: None,
            logo: None,
        }
    }

    #[test]
    fn test_facets_sorted_unique() {
        let items = vec![
            acc(1, Some("Oran")),
            acc(2, Some("Algiers")),
            acc(3, Some("Oran")),
            acc(4, Some("Constantine")),
        ];
        assert_eq!(
            extract_facets(&items),
            vec!["Algiers", "Constantine", "Oran"]
        );
    }

    #[test]
    fn test_facets_drop_missing_and_empty() {
        let items = vec![acc(1, None), acc(2, Some("")), acc(3, Some("Blida"))];
        assert_eq!(extract_facets(&items), vec!["Blida"]);
    }

    #[test]
    fn test_facets_case_sensitive_dedup() {
        let items = vec![acc(1, Some("oran")), acc(2, Some("Oran"))];
        assert_eq!(extract_facets(&items), vec!["Oran", "oran"]);
    }

    #[test]
    fn test_facets_empty_collection() {
        let items: Vec<Accelerator> = Vec::new();
        assert!(extract_facets(&items).is_empty());
    }

    #[test]
    fn test_cache_recomputes_only_on_new_revision() {
        let items = vec![acc(1, Some("Oran"))];
        let mut cache = FacetCache::new();
        assert_eq!(cache.get(1, &items), ["Oran".to_string()]);
        cache.get(1, &items);
        cache.get(1, &items);
        assert_eq!(cache.recomputes(), 1);

        let more = vec![acc(1, Some("Oran")), acc(2, Some("Setif"))];
        assert_eq!(cache.get(2, &more).len(), 2);
        assert_eq!(cache.recomputes(), 2);
    }
}
