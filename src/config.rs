use anyhow::{Context, Result};
use eco_directory_core::models::MediaCategory;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub media_categories: Vec<MediaCategory>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    #[serde(default = "default_listing_page_size")]
    pub page_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_listing_page_size(),
        }
    }
}

fn default_listing_page_size() -> usize {
    9
}

#[derive(Debug, Deserialize, Clone)]
pub struct TableConfig {
    #[serde(default = "default_table_page_size")]
    pub page_size: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_table_page_size(),
        }
    }
}

fn default_table_page_size() -> usize {
    10
}

/// Record type carried by a source.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Accelerators,
    Media,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Accelerators => "accelerators",
            ListingKind::Media => "media",
        }
    }
}

/// One entity source: a static JSON bundle (`path`) or a remote endpoint (`url`).
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub kind: ListingKind,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub empty_message: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SourceConfig {
    pub fn title(&self, name: &str) -> String {
        self.title.clone().unwrap_or_else(|| {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
    }

    pub fn empty_message(&self, name: &str) -> String {
        self.empty_message
            .clone()
            .unwrap_or_else(|| format!("No {} found", name))
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Where named lookup tables come from: a remote lookup endpoint or a
/// directory of `<table>.json` files.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LookupConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7400".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Look up a configured source by listing name.
    pub fn source(&self, name: &str) -> Result<&SourceConfig> {
        self.sources.get(name).with_context(|| {
            let known: Vec<&str> = self.sources.keys().map(String::as_str).collect();
            format!(
                "unknown listing '{}' (configured: {})",
                name,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            )
        })
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.listing.page_size == 0 {
        anyhow::bail!("listing.page_size must be >= 1");
    }
    if config.table.page_size == 0 {
        anyhow::bail!("table.page_size must be >= 1");
    }

    for (name, source) in &config.sources {
        match (&source.path, &source.url) {
            (Some(_), Some(_)) => {
                anyhow::bail!("sources.{}: set either path or url, not both", name)
            }
            (None, None) => anyhow::bail!("sources.{}: one of path or url is required", name),
            _ => {}
        }
        if source.timeout_secs == 0 {
            anyhow::bail!("sources.{}.timeout_secs must be > 0", name);
        }
    }

    if config.lookup.url.is_some() && config.lookup.dir.is_some() {
        anyhow::bail!("lookup: set either url or dir, not both");
    }

    match config.log.level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        other => anyhow::bail!(
            "Unknown log level: '{}'. Must be trace, debug, info, warn, or error.",
            other
        ),
    }

    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.listing.page_size, 9);
        assert_eq!(cfg.table.page_size, 10);
        assert_eq!(cfg.server.bind, "127.0.0.1:7400");
        assert!(cfg.sources.is_empty());
    }

    #[test]
    fn test_sources_and_titles() {
        let cfg = parse_config(
            r#"
[sources.accelerators]
kind = "accelerators"
path = "data/accelerators.json"

[sources.media]
kind = "media"
url = "https://example.org/media"
title = "Media Outlets"
empty_message = "Nothing on air"

[[media_categories]]
slug = "radio"
name = "Radio"
icon = "R"
"#,
        )
        .unwrap();
        let acc = cfg.source("accelerators").unwrap();
        assert_eq!(acc.kind, ListingKind::Accelerators);
        assert_eq!(acc.title("accelerators"), "Accelerators");
        assert_eq!(acc.empty_message("accelerators"), "No accelerators found");
        let media = cfg.source("media").unwrap();
        assert_eq!(media.title("media"), "Media Outlets");
        assert_eq!(media.empty_message("media"), "Nothing on air");
        assert_eq!(cfg.media_categories.len(), 1);
        assert!(cfg.source("events").is_err());
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = parse_config("[listing]\npage_size = 0\n").unwrap_err();
        assert!(err.to_string().contains("listing.page_size"));
    }

    #[test]
    fn test_rejects_source_with_both_origins() {
        let err = parse_config(
            "[sources.x]\nkind = \"media\"\npath = \"a.json\"\nurl = \"http://b\"\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn test_rejects_source_without_origin() {
        assert!(parse_config("[sources.x]\nkind = \"media\"\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(parse_config("[sources.x]\nkind = \"events\"\npath = \"a\"\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(parse_config("[log]\nlevel = \"loud\"\n").is_err());
    }
}
