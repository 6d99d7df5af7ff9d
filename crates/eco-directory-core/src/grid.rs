//! Card-grid presentation for public listings.

use crate::models::Listable;

/// A card slot in the grid, keyed by the entity name.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCard<'a, T> {
    pub key: &'a str,
    /// Position on the page, used by renderers to stagger entry animation.
    pub index: usize,
    pub item: &'a T,
}

/// What a listing grid shows for one page of results.
#[derive(Debug, Clone, PartialEq)]
pub enum GridView<'a, T> {
    /// No entities on this page. The clear-filters action resets search,
    /// category filter and page to their defaults.
    Empty {
        message: String,
        can_clear_filters: bool,
    },
    Cards(Vec<GridCard<'a, T>>),
}

impl<T> GridView<'_, T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, GridView::Empty { .. })
    }
}

/// Lay out one page of entities, falling back to an empty state.
pub fn grid_view<'a, T: Listable>(items: &'a [T], empty_message: &str) -> GridView<'a, T> {
    if items.is_empty() {
        return GridView::Empty {
            message: empty_message.to_string(),
            can_clear_filters: true,
        };
    }
    GridView::Cards(
        items
            .iter()
            .enumerate()
            .map(|(index, item)| GridCard {
                key: item.name(),
                index,
                item,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, MediaOutlet};

    fn outlet(title: &str) -> MediaOutlet {
        MediaOutlet {
            id: EntityId::Text(title.to_lowercase()),
            title: title.to_string(),
            description: String::new(),
            url: String::new(),
            image: None,
            category: None,
            founded_year: None,
        }
    }

    #[test]
    fn test_empty_page_offers_clear_filters() {
        let items: Vec<MediaOutlet> = Vec::new();
        match grid_view(&items, "No media found") {
            GridView::Empty {
                message,
                can_clear_filters,
            } => {
                assert_eq!(message, "No media found");
                assert!(can_clear_filters);
            }
            GridView::Cards(_) => panic!("expected empty state"),
        }
    }

    #[test]
    fn test_cards_keyed_by_name_in_order() {
        let items = vec![outlet("Radio M"), outlet("TSA")];
        let GridView::Cards(cards) = grid_view(&items, "none") else {
            panic!("expected cards");
        };
        let keys: Vec<(&str, usize)> = cards.iter().map(|c| (c.key, c.index)).collect();
        assert_eq!(keys, vec![("Radio M", 0), ("TSA", 1)]);
    }
}
