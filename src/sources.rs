use anyhow::Result;

use crate::config::Config;

/// Print every configured listing with its kind and origin.
pub fn list_sources(config: &Config) -> Result<()> {
    println!("{:<16} {:<14} ORIGIN", "LISTING", "KIND");
    for (name, source) in &config.sources {
        let origin = match (&source.path, &source.url) {
            (Some(path), _) => {
                let status = if path.exists() { "" } else { " (missing)" };
                format!("file:{}{}", path.display(), status)
            }
            (None, Some(url)) => format!("http:{}", url),
            (None, None) => "NOT CONFIGURED".to_string(),
        };
        println!("{:<16} {:<14} {}", name, source.kind.as_str(), origin);
    }
    Ok(())
}
