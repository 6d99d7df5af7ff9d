//! `eco nav`: header navigation from the `entity_types` lookup table.

use anyhow::Result;
use eco_directory_core::nav::{build_nav, NavItem};

use crate::config::Config;
use crate::lookup::LookupClient;

/// Lookup table listing the directory's entity kinds.
pub const ENTITY_TYPES_TABLE: &str = "entity_types";

/// Fetch entity types and build the navigation bar.
pub async fn fetch_nav(config: &Config) -> Result<Vec<NavItem>> {
    let client = LookupClient::from_config(&config.lookup)?;
    let types = client.fetch_table(ENTITY_TYPES_TABLE).await?;
    tracing::debug!(count = types.len(), "fetched entity types");
    Ok(build_nav(&types))
}

pub async fn run_nav(config: &Config, json: bool) -> Result<()> {
    let nav = fetch_nav(config).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&nav)?);
        return Ok(());
    }

    println!("{:<24} {:<16} ICON", "PATH", "LABEL");
    for item in &nav {
        let icon = serde_json::to_value(item.icon)?;
        println!(
            "{:<24} {:<16} {}",
            item.path,
            item.label,
            icon.as_str().unwrap_or_default()
        );
    }
    Ok(())
}
