//! Inspector configuration
//!
//! Holds the locale conventions used for value display and parsing, the
//! fallback category name, and the cascade path separator. Loaded from TOML;
//! any missing field takes its default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::InspectorResult;

/// Category assigned to properties that declare none
const DEFAULT_CATEGORY: &str = "Misc";
/// Separator between cascade level labels in a committed value
const DEFAULT_PATH_SEPARATOR: char = '/';

/// Number, list and collation conventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// BCP 47 language tag used to order groups and entries (`und` is the root order)
    pub language: String,
    /// Decimal separator for floating-point display and parsing
    pub decimal_separator: char,
    /// Separator placed between items when a list value is displayed
    pub list_separator: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: "und".to_string(),
            decimal_separator: '.',
            list_separator: ", ".to_string(),
        }
    }
}

/// Main inspector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Category used when a descriptor has none
    pub default_category: String,
    /// Separator joining cascade labels, also used to pre-seed a cascade
    pub path_separator: char,
    /// Locale conventions
    pub locale: LocaleConfig,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.to_string(),
            path_separator: DEFAULT_PATH_SEPARATOR,
            locale: LocaleConfig::default(),
        }
    }
}

impl InspectorConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> InspectorResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> InspectorResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> InspectorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> InspectorResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
