//! Core data models for the directory.
//!
//! Listing records implement two traits: [`Listable`] exposes the fields the
//! query reducer reads, and [`Record`] exposes a stable identity plus
//! field-by-key access for the data table. Records are immutable here; the
//! external data layer produces a fresh collection after every mutation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Stable identity of a record, unique within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

/// A single field value read off a record by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Missing,
}

impl FieldValue {
    /// Value as shown in a table cell. Missing fields render empty.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Missing => String::new(),
        }
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(v: Option<&str>) -> Self {
        v.map_or(FieldValue::Missing, |s| FieldValue::Text(s.to_string()))
    }
}

impl From<Option<i64>> for FieldValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(FieldValue::Missing, FieldValue::Number)
    }
}

/// Categorical field: anything but a JSON string reads as absent.
fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Ordering field: integers, or strings holding one. Anything else reads as
/// absent and sorts as the minimum.
fn lenient_year<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Fields read by the facet extractor and the query reducer.
pub trait Listable {
    /// Display name, searched case-insensitively.
    fn name(&self) -> &str;

    /// Free-text description, searched case-insensitively.
    fn description(&self) -> &str;

    /// Value of the designated categorical field, if present.
    fn category(&self) -> Option<&str>;

    /// Numeric ordering attribute. `None` sorts as the minimal value.
    fn ordering_value(&self) -> Option<i64>;
}

/// A record with a unique identity, addressable by field key.
///
/// Duplicate ids inside one collection are a caller error: the table uses
/// the id as the row key and does not check uniqueness.
pub trait Record {
    fn id(&self) -> EntityId;

    fn field(&self, key: &str) -> FieldValue;
}

/// A startup accelerator listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accelerator {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub founded_year: Option<i64>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Listable for Accelerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<&str> {
        self.city.as_deref()
    }

    fn ordering_value(&self) -> Option<i64> {
        self.founded_year
    }
}

impl Record for Accelerator {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => match &self.id {
                EntityId::Number(n) => FieldValue::Number(*n),
                EntityId::Text(s) => FieldValue::Text(s.clone()),
            },
            "name" => FieldValue::Text(self.name.clone()),
            "description" => FieldValue::Text(self.description.clone()),
            "city" => self.city.as_deref().into(),
            "foundedYear" | "founded_year" => self.founded_year.into(),
            "website" => self.website.as_deref().into(),
            "logo" => self.logo.as_deref().into(),
            _ => FieldValue::Missing,
        }
    }
}

/// A media outlet listing (news site, podcast, newsletter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaOutlet {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Slug of the owning [`MediaCategory`].
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub founded_year: Option<i64>,
}

impl Listable for MediaOutlet {
    fn name(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn ordering_value(&self) -> Option<i64> {
        self.founded_year
    }
}

impl Record for MediaOutlet {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => match &self.id {
                EntityId::Number(n) => FieldValue::Number(*n),
                EntityId::Text(s) => FieldValue::Text(s.clone()),
            },
            "title" | "name" => FieldValue::Text(self.title.clone()),
            "description" => FieldValue::Text(self.description.clone()),
            "url" => FieldValue::Text(self.url.clone()),
            "image" => self.image.as_deref().into(),
            "category" => self.category.as_deref().into(),
            "foundedYear" | "founded_year" => self.founded_year.into(),
            _ => FieldValue::Missing,
        }
    }
}

/// Display metadata for a media category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCategory {
    pub slug: String,
    pub name: String,
    /// Emoji glyph shown when an outlet has no image.
    pub icon: String,
}

/// Sort direction for the ordering attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    /// Most recent first.
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}': use asc or desc", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Categorical filter. `All` is the no-filter sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse user input, mapping `"all"` and the empty string to [`CategoryFilter::All`].
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(v) => v,
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(CategoryFilter::parse(&s))
    }
}

/// User-controlled filtering and sorting parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryDescriptor {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub filter: CategoryFilter,
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// One row of a named lookup table (`entity_types`, `media_categories`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: EntityId,
    pub slug: String,
    pub name: String,
}

/// Observable state of an entity source fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Pending,
    Resolved(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadState::Pending => LoadStatus::Pending,
            LoadState::Resolved(_) => LoadStatus::Resolved,
            LoadState::Failed(_) => LoadStatus::Failed,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> From<Result<T, String>> for LoadState<T> {
    fn from(r: Result<T, String>) -> Self {
        match r {
            Ok(v) => LoadState::Resolved(v),
            Err(e) => LoadState::Failed(e),
        }
    }
}

/// Status flag of a [`LoadState`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Pending,
    Resolved,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_untagged() {
        let ids: Vec<EntityId> = serde_json::from_str(r#"[7, "abc"]"#).unwrap();
        assert_eq!(ids[0], EntityId::Number(7));
        assert_eq!(ids[1], EntityId::Text("abc".to_string()));
        assert_eq!(ids[0].to_string(), "7");
        assert_eq!(EntityId::Text("007".to_string()).to_string(), "007");
    }

    #[test]
    fn test_accelerator_camel_case() {
        let json = r#"{"id": 1, "name": "Algiers Hub", "description": "d",
                       "city": "Algiers", "foundedYear": 2020}"#;
        let a: Accelerator = serde_json::from_str(json).unwrap();
        assert_eq!(a.founded_year, Some(2020));
        assert_eq!(a.category(), Some("Algiers"));
        assert_eq!(a.field("foundedYear"), FieldValue::Number(2020));
        assert_eq!(a.field("website"), FieldValue::Missing);
    }

    #[test]
    fn test_accelerator_missing_optional_fields() {
        let a: Accelerator = serde_json::from_str(r#"{"id": "a", "name": "X"}"#).unwrap();
        assert_eq!(a.description, "");
        assert!(a.city.is_none());
        assert!(a.ordering_value().is_none());
    }

    #[test]
    fn test_malformed_category_and_year_read_as_absent() {
        let json = r#"[
            {"id": 1, "name": "Algiers Hub", "city": "Algiers", "foundedYear": 2020},
            {"id": 2, "name": "Oran Labs", "city": 42, "foundedYear": "unknown"},
            {"id": 3, "name": "Setif Works", "city": null, "foundedYear": "2019"}
        ]"#;
        let all: Vec<Accelerator> = serde_json::from_str(json).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].category(), Some("Algiers"));
        assert!(all[1].city.is_none());
        assert!(all[1].ordering_value().is_none());
        assert!(all[2].city.is_none());
        assert_eq!(all[2].ordering_value(), Some(2019));

        let m: MediaOutlet = serde_json::from_str(
            r#"{"id": "m", "title": "T", "category": ["radio"], "foundedYear": 1.5}"#,
        )
        .unwrap();
        assert!(m.category().is_none());
        assert!(m.ordering_value().is_none());
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn test_category_filter_sentinel() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Oran"),
            CategoryFilter::Only("Oran".to_string())
        );
        let q: QueryDescriptor =
            serde_json::from_str(r#"{"filter": "all", "sort_order": "asc"}"#).unwrap();
        assert_eq!(q.filter, CategoryFilter::All);
        assert_eq!(q.sort_order, SortOrder::Asc);
        assert_eq!(q.search_text, "");
    }
}
