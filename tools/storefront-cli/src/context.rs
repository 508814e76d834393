//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;
use storefront_commerce::catalog::{Catalog, Product};

use crate::config::{StoreConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StoreConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

/// TOML catalog layout: a list of `[[products]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (StoreConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StoreConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StoreConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = StoreConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path where `config init` writes a new file.
    pub fn default_config_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_FILE_NAMES[0])
    }

    /// Load the configured catalog, or the demo catalog when none is set.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.config.catalog.path else {
            return Ok(Catalog::seeded());
        };

        let path = self.resolve(path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let catalog = if path.extension().is_some_and(|e| e == "toml") {
            let file: CatalogFile = toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML catalog: {}", path.display()))?;
            Catalog::new(file.products)
        } else {
            Catalog::from_json(&content)
        }
        .with_context(|| format!("Invalid catalog: {}", path.display()))?;

        tracing::debug!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Resolve a path relative to the config file's directory, else the cwd.
    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(path))
            .unwrap_or_else(|| self.cwd.join(path))
    }

    /// Low-stock threshold from config.
    pub fn low_stock_threshold(&self) -> i64 {
        self.config.store.low_stock_threshold
    }
}
