//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::LOW_STOCK_THRESHOLD;

use crate::logging::LoggingConfig;

/// Default config file names, searched in this order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Store presentation settings.
    #[serde(default)]
    pub store: StoreSection,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StoreConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; the format follows the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Problems that make the config unusable.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.store.name.trim().is_empty() {
            problems.push("store.name must not be empty".to_string());
        }
        if self.store.low_stock_threshold < 0 {
            problems.push("store.low_stock_threshold must be 0 or greater".to_string());
        }
        if let Some(path) = &self.catalog.path {
            if !(path.ends_with(".json") || path.ends_with(".toml")) {
                problems.push(format!(
                    "catalog.path must be a .json or .toml file: {}",
                    path
                ));
            }
        }
        problems
    }
}

/// Store presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSection {
    /// Store name shown in headers.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Products with less stock than this get a low-stock badge.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

fn default_store_name() -> String {
    "Storefront".to_string()
}

fn default_low_stock_threshold() -> i64 {
    LOW_STOCK_THRESHOLD
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

/// Where products come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogSection {
    /// Catalog file (JSON array or TOML `[[products]]`). Demo products when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[store]
name = "{name}"
low_stock_threshold = {threshold}

[catalog]
# JSON array of products, or TOML with [[products]] tables.
# path = "catalog.json"

[logging]
level = "warn"
format = "human"
"#,
        name = default_store_name(),
        threshold = LOW_STOCK_THRESHOLD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = StoreConfig::parse("storefront.toml", &generate_default_config()).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = StoreConfig::parse(
            "storefront.toml",
            "[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
        )
        .unwrap();
        assert_eq!(config.store.name, "Storefront");
        assert_eq!(config.store.low_stock_threshold, 5);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_json_config() {
        let config = StoreConfig::parse(
            "storefront.json",
            r#"{"store": {"name": "Gadgets"}, "catalog": {"path": "items.json"}}"#,
        )
        .unwrap();
        assert_eq!(config.store.name, "Gadgets");
        assert_eq!(config.catalog.path.as_deref(), Some("items.json"));
    }

    #[test]
    fn test_problems() {
        let mut config = StoreConfig::default();
        assert!(config.problems().is_empty());

        config.store.name = " ".to_string();
        config.store.low_stock_threshold = -1;
        config.catalog.path = Some("items.csv".to_string());
        assert_eq!(config.problems().len(), 3);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = StoreConfig::parse("storefront.toml", "[store\nname=").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }
}
