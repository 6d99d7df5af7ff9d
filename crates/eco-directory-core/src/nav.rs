//! Header navigation built from the `entity_types` lookup table.
//!
//! Entity kinds are a closed set resolved once from their slug. Slugs the
//! directory does not know become [`EntityKind::Other`] and get the
//! [`Icon::Info`] fallback explicitly, instead of a silent map miss.

use serde::Serialize;
use std::cmp::Ordering;

use crate::models::LookupEntry;

/// Icons available to navigation items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Rocket,
    Building,
    Zap,
    Users,
    Radio,
    Briefcase,
    MessageCircle,
    Calendar,
    BookOpen,
    Info,
}

/// Kinds of listed entities, in navigation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Startup,
    Incubator,
    Accelerator,
    CoworkingSpace,
    Media,
    JobPortal,
    Community,
    Event,
    Resource,
    Other(String),
}

impl EntityKind {
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "startup" => EntityKind::Startup,
            "incubator" => EntityKind::Incubator,
            "accelerator" => EntityKind::Accelerator,
            "coworking-space" => EntityKind::CoworkingSpace,
            "media" => EntityKind::Media,
            "job_portal" => EntityKind::JobPortal,
            "community" => EntityKind::Community,
            "event" => EntityKind::Event,
            "resource" => EntityKind::Resource,
            other => EntityKind::Other(other.to_string()),
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            EntityKind::Startup => Icon::Rocket,
            EntityKind::Incubator => Icon::Building,
            EntityKind::Accelerator => Icon::Zap,
            EntityKind::CoworkingSpace => Icon::Users,
            EntityKind::Media => Icon::Radio,
            EntityKind::JobPortal => Icon::Briefcase,
            EntityKind::Community => Icon::MessageCircle,
            EntityKind::Event => Icon::Calendar,
            EntityKind::Resource => Icon::BookOpen,
            EntityKind::Other(_) => Icon::Info,
        }
    }

    /// Position in the navigation bar; `None` for unknown kinds.
    pub fn rank(&self) -> Option<usize> {
        match self {
            EntityKind::Startup => Some(0),
            EntityKind::Incubator => Some(1),
            EntityKind::Accelerator => Some(2),
            EntityKind::CoworkingSpace => Some(3),
            EntityKind::Media => Some(4),
            EntityKind::JobPortal => Some(5),
            EntityKind::Community => Some(6),
            EntityKind::Event => Some(7),
            EntityKind::Resource => Some(8),
            EntityKind::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: String,
    pub label: String,
    pub icon: Icon,
}

fn nav_order(a: &(Option<usize>, NavItem), b: &(Option<usize>, NavItem)) -> Ordering {
    match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .1
            .label
            .to_lowercase()
            .cmp(&b.1.label.to_lowercase())
            .then_with(|| a.1.label.cmp(&b.1.label)),
    }
}

/// Navigation items for the given entity types, followed by `About`.
///
/// Known kinds keep their fixed order; unknown kinds follow, by label.
pub fn build_nav(entity_types: &[LookupEntry]) -> Vec<NavItem> {
    let mut items: Vec<(Option<usize>, NavItem)> = entity_types
        .iter()
        .map(|t| {
            let kind = EntityKind::from_slug(&t.slug);
            (
                kind.rank(),
                NavItem {
                    path: format!("/{}s", t.slug),
                    label: t.name.clone(),
                    icon: kind.icon(),
                },
            )
        })
        .collect();
    items.sort_by(nav_order);

    let mut nav: Vec<NavItem> = items.into_iter().map(|(_, item)| item).collect();
    nav.push(NavItem {
        path: "/about".to_string(),
        label: "About".to_string(),
        icon: Icon::Info,
    });
    nav
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityId;

    fn entry(id: i64, slug: &str, name: &str) -> LookupEntry {
        LookupEntry {
            id: EntityId::Number(id),
            slug: slug.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_known_kinds_in_fixed_order() {
        let nav = build_nav(&[
            entry(1, "media", "Media"),
            entry(2, "startup", "Startups"),
            entry(3, "accelerator", "Accelerators"),
        ]);
        let paths: Vec<&str> = nav.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["/startups", "/accelerators", "/medias", "/about"]);
        assert_eq!(nav[1].icon, Icon::Zap);
    }

    #[test]
    fn test_unknown_kinds_after_known_by_label() {
        let nav = build_nav(&[
            entry(1, "podcast", "Podcasts"),
            entry(2, "event", "Events"),
            entry(3, "investor", "investors"),
        ]);
        let labels: Vec<&str> = nav.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Events", "investors", "Podcasts", "About"]);
        assert_eq!(nav[1].icon, Icon::Info);
        assert_eq!(nav[2].icon, Icon::Info);
    }

    #[test]
    fn test_empty_lookup_still_has_about() {
        let nav = build_nav(&[]);
        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].path, "/about");
    }

    #[test]
    fn test_slug_resolution() {
        assert_eq!(EntityKind::from_slug("coworking-space"), EntityKind::CoworkingSpace);
        assert_eq!(EntityKind::from_slug("job_portal").icon(), Icon::Briefcase);
        assert_eq!(
            EntityKind::from_slug("Startup"),
            EntityKind::Other("Startup".to_string())
        );
    }
}
