use anyhow::{Context, Result};
use search_syntax::ConflictRules;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use term_catalog::Language;
use tracing::{info, warn};

/// Engine settings, usually read from a JSON file.
///
/// ```
/// use searchlingo::EngineConfig;
/// use term_catalog::Language;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "canonical": "de" }"#).unwrap();
/// assert_eq!(config.canonical, Language::De);
/// assert!(config.catalog.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Language queries are analyzed in.
    pub canonical: Language,
    /// Catalog file; the bundled catalog when absent.
    pub catalog: Option<PathBuf>,
    pub rules: ConflictRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canonical: Language::CANONICAL,
            catalog: None,
            rules: ConflictRules::default(),
        }
    }
}

impl EngineConfig {
    /// Reads a config file. A relative `catalog` path is resolved against the
    /// directory the config file lives in.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: EngineConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        if let (Some(catalog), Some(base)) = (&config.catalog, path.parent()) {
            if catalog.is_relative() {
                config.catalog = Some(base.join(catalog));
            }
        }
        if config.rules.exclusive.is_empty() && config.rules.categories.is_empty() {
            warn!("config {} disables every conflict rule", path.display());
        }
        info!(canonical = %config.canonical, catalog = ?config.catalog, "Loaded engine config");
        Ok(config)
    }
}
