//! Named lookup tables (`entity_types`, ...).
//!
//! Remote lookups are a `GET <url>?task=get-lookups&table=<table>` returning
//! `[{ "id", "slug", "name" }]`. A local directory of `<table>.json` files
//! can stand in for the endpoint.

use anyhow::{bail, Context, Result};
use eco_directory_core::models::LookupEntry;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::LookupConfig;

pub enum LookupClient {
    Remote {
        url: String,
        client: reqwest::Client,
    },
    Local {
        dir: PathBuf,
    },
}

impl LookupClient {
    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        match (&config.url, &config.dir) {
            (Some(url), None) => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.timeout_secs.unwrap_or(30)))
                    .build()
                    .context("Failed to build HTTP client")?;
                Ok(LookupClient::Remote {
                    url: url.clone(),
                    client,
                })
            }
            (None, Some(dir)) => Ok(LookupClient::Local { dir: dir.clone() }),
            (None, None) => bail!("no lookup source configured (set [lookup] url or dir)"),
            (Some(_), Some(_)) => bail!("lookup: set either url or dir, not both"),
        }
    }

    pub async fn fetch_table(&self, table: &str) -> Result<Vec<LookupEntry>> {
        match self {
            LookupClient::Remote { url, client } => {
                let resp = client
                    .get(url)
                    .query(&[("task", "get-lookups"), ("table", table)])
                    .send()
                    .await
                    .with_context(|| format!("Lookup request for '{}' failed", table))?;
                let status = resp.status();
                if !status.is_success() {
                    bail!("lookup '{}' returned {}", table, status);
                }
                resp.json()
                    .await
                    .with_context(|| format!("Invalid lookup response for '{}'", table))
            }
            LookupClient::Local { dir } => {
                let path = dir.join(format!("{}.json", table));
                let content = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_lookup_table() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("entity_types.json"),
            r#"[{"id": "a1", "slug": "startup", "name": "Startups"}]"#,
        )
        .unwrap();
        let client = LookupClient::from_config(&LookupConfig {
            url: None,
            dir: Some(tmp.path().to_path_buf()),
            timeout_secs: None,
        })
        .unwrap();
        let rows = client.fetch_table("entity_types").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].slug, "startup");
        assert!(client.fetch_table("missing").await.is_err());
    }

    #[test]
    fn test_unconfigured_lookup() {
        assert!(LookupClient::from_config(&LookupConfig::default()).is_err());
    }
}
