//! Application configuration for docrank.
//!
//! User config lives at `~/.docrank/docrank.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocrankError, Result};
use crate::types::UNCATEGORIZED;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docrank.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docrank";

/// Listing order of categories; anything not named here sorts with
/// `uncategorized`.
pub const DEFAULT_CATEGORY_ORDER: [&str; 4] =
    ["getting-started", "batteries", "development", UNCATEGORIZED];

/// Number of related documents returned when the caller does not ask for
/// a specific count.
pub const DEFAULT_RELATED_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Config structs (matching docrank.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where content comes from and how it is routed.
    #[serde(default)]
    pub content: ContentConfig,

    /// Listing and related-content sizes.
    #[serde(default)]
    pub listing: ListingConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the markdown collection.
    #[serde(default = "default_content_dir")]
    pub dir: String,

    /// Route prefix used to build permalinks.
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Category priority list for listings.
    #[serde(default = "default_category_order")]
    pub category_order: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            route_prefix: default_route_prefix(),
            category_order: default_category_order(),
        }
    }
}

fn default_content_dir() -> String {
    "content/docs".into()
}
fn default_route_prefix() -> String {
    "/docs".into()
}
fn default_category_order() -> Vec<String> {
    DEFAULT_CATEGORY_ORDER.iter().map(|c| c.to_string()).collect()
}

/// `[listing]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Documents per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Related documents shown per document.
    #[serde(default = "default_related_count")]
    pub related_count: usize,

    /// Entries in the "latest" listing.
    #[serde(default = "default_latest_count")]
    pub latest_count: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            related_count: default_related_count(),
            latest_count: default_latest_count(),
        }
    }
}

fn default_page_size() -> usize {
    20
}
fn default_related_count() -> usize {
    DEFAULT_RELATED_COUNT
}
fn default_latest_count() -> usize {
    10
}

impl AppConfig {
    /// Reject values no command can work with.
    pub fn validate(&self) -> Result<()> {
        if !self.content.route_prefix.starts_with('/') {
            return Err(DocrankError::config(format!(
                "route_prefix must start with '/', got '{}'",
                self.content.route_prefix
            )));
        }
        if self.content.category_order.is_empty() {
            return Err(DocrankError::config("category_order must not be empty"));
        }
        if self.listing.page_size == 0 {
            return Err(DocrankError::config("page_size must be at least 1"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docrank/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocrankError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docrank/docrank.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load and validate the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocrankError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        DocrankError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocrankError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| DocrankError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocrankError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).expect("serialize");
        assert!(toml_str.contains("route_prefix"));
        assert!(toml_str.contains("getting-started"));
    }

    #[test]
    fn config_roundtrip() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.listing.page_size, 20);
        assert_eq!(parsed.listing.related_count, DEFAULT_RELATED_COUNT);
        assert_eq!(parsed.content.category_order.len(), 4);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let toml_str = r#"
[content]
dir = "/srv/site/posts"

[listing]
related_count = 6
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.content.dir, "/srv/site/posts");
        assert_eq!(config.content.route_prefix, "/docs");
        assert_eq!(config.listing.related_count, 6);
        assert_eq!(config.listing.page_size, 20);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.content.route_prefix = "docs".into();
        assert!(config.validate().unwrap_err().to_string().contains("route_prefix"));

        let mut config = AppConfig::default();
        config.listing.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.content.category_order.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[listing\npage_size = ").expect("write");

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
