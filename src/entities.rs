//! Per-record-type presentation: admin columns, table search key and cards.

use eco_directory_core::models::{Accelerator, Listable, MediaCategory, MediaOutlet, Record};
use eco_directory_core::table::Column;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Descriptions longer than this are cut on cards unless expanded.
pub const DESCRIPTION_LIMIT: usize = 150;

/// A record type that can be listed, tabulated and rendered as a card.
pub trait DirectoryEntity:
    Listable + Record + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Columns for the admin table, actions column last.
    fn admin_columns() -> Vec<Column<Self>>;

    /// Field searched by the admin table.
    fn search_key() -> &'static str;

    fn card(&self, ctx: &CardContext<'_>) -> Card;
}

/// Shared data and switches for card rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardContext<'a> {
    pub media_categories: &'a [MediaCategory],
    /// Show full descriptions instead of truncating.
    pub expand: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub badge: Option<String>,
    pub subtitle: Option<String>,
    pub description: String,
    pub truncated: bool,
    pub link: Option<String>,
}

/// Cut `text` to [`DESCRIPTION_LIMIT`] characters unless `expand` is set.
///
/// Returns the text to show and whether it was cut.
pub fn truncate_description(text: &str, expand: bool) -> (String, bool) {
    if expand || text.chars().count() <= DESCRIPTION_LIMIT {
        return (text.to_string(), false);
    }
    (text.chars().take(DESCRIPTION_LIMIT).collect(), true)
}

impl DirectoryEntity for Accelerator {
    fn admin_columns() -> Vec<Column<Self>> {
        vec![
            Column::field("name", "Name"),
            Column::field("city", "City"),
            Column::field("foundedYear", "Founded"),
            Column::field("website", "Website")
                .with_render(|a: &Accelerator| a.website.clone().unwrap_or_else(|| "-".into())),
            Column::actions("Actions"),
        ]
    }

    fn search_key() -> &'static str {
        "name"
    }

    fn card(&self, ctx: &CardContext<'_>) -> Card {
        let (description, truncated) = truncate_description(&self.description, ctx.expand);
        let subtitle = match (&self.city, self.founded_year) {
            (Some(city), Some(year)) => Some(format!("{} · since {}", city, year)),
            (Some(city), None) => Some(city.clone()),
            (None, Some(year)) => Some(format!("since {}", year)),
            (None, None) => None,
        };
        Card {
            title: self.name.clone(),
            badge: None,
            subtitle,
            description,
            truncated,
            link: self.website.clone(),
        }
    }
}

impl DirectoryEntity for MediaOutlet {
    fn admin_columns() -> Vec<Column<Self>> {
        vec![
            Column::field("title", "Title"),
            Column::field("category", "Category"),
            Column::field("url", "URL"),
            Column::actions("Actions"),
        ]
    }

    fn search_key() -> &'static str {
        "title"
    }

    fn card(&self, ctx: &CardContext<'_>) -> Card {
        let category = self
            .category
            .as_deref()
            .and_then(|slug| ctx.media_categories.iter().find(|c| c.slug == slug));
        let (description, truncated) = truncate_description(&self.description, ctx.expand);
        Card {
            title: self.title.clone(),
            // the category icon stands in for a missing image
            badge: match (&self.image, category) {
                (None, Some(c)) => Some(c.icon.clone()),
                _ => None,
            },
            subtitle: category.map(|c| c.name.clone()),
            description,
            truncated,
            link: Some(self.url.clone()).filter(|u| !u.is_empty()),
        }
    }
}
