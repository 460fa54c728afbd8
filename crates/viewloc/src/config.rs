#![forbid(unsafe_code)]

//! Localization settings as data.
//!
//! ```toml
//! # viewloc.toml
//! default_culture = "de-DE"
//! view_model_suffix = "ViewModel"
//! binding_suffixes = ["BusyContent", "Caption", "Content", "Header", "Text", "ToolTip"]
//!
//! [resources]
//! directory = "texts"
//! base_name = "Strings"
//! format = "toml"
//! parent_fallback = true
//! ```
//!
//! ```rust,ignore
//! let config = LocalizationConfig::from_toml_file("viewloc.toml")?;
//! ```
//!
//! Every field has a default, so partial files are fine and
//! `LocalizationConfig::default()` reproduces the built-in conventions.

use std::path::PathBuf;

#[cfg(feature = "resource-files")]
use std::path::Path;

#[cfg(feature = "resource-files")]
use serde::{Deserialize, Serialize};

use crate::culture::Culture;
#[cfg(feature = "resource-files")]
use crate::error::ConfigError;
use crate::error::Result;
use crate::key::{DEFAULT_BINDING_SUFFIXES, DEFAULT_VIEW_MODEL_SUFFIX, KeyDeriver};

/// Culture established when nothing else has been chosen.
pub const DEFAULT_CULTURE: &str = "de-DE";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "resource-files", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "resource-files", serde(default))]
pub struct LocalizationConfig {
    /// Culture the coordinator falls back to on first access.
    pub default_culture: String,

    /// Suffix stripped from view-model class names.
    pub view_model_suffix: String,

    /// Recognized data-binding property suffixes.
    pub binding_suffixes: Vec<String>,

    pub resources: ResourceConfig,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            default_culture: DEFAULT_CULTURE.to_string(),
            view_model_suffix: DEFAULT_VIEW_MODEL_SUFFIX.to_string(),
            binding_suffixes: DEFAULT_BINDING_SUFFIXES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            resources: ResourceConfig::default(),
        }
    }
}

/// Where text resource files live and how to read them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "resource-files", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "resource-files", serde(default))]
pub struct ResourceConfig {
    pub directory: PathBuf,
    /// File stem shared by all cultures: `{base_name}.{culture}.{ext}`.
    pub base_name: String,
    pub format: ResourceFormat,
    /// Walk `de-DE` → `de` → invariant when a key is missing.
    pub parent_fallback: bool,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("resources"),
            base_name: "Strings".to_string(),
            format: ResourceFormat::Toml,
            parent_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "resource-files", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "resource-files", serde(rename_all = "lowercase"))]
pub enum ResourceFormat {
    #[default]
    Toml,
    Json,
}

impl ResourceFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

impl LocalizationConfig {
    /// Load from a TOML string.
    #[cfg(feature = "resource-files")]
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "resource-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "resource-files")]
    pub fn from_json_str(s: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "resource-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_json_str(&content)
    }

    /// Check every field; an empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = Culture::new(&self.default_culture) {
            errors.push(format!("default_culture: {e}"));
        }

        if self.binding_suffixes.is_empty() {
            errors.push("binding_suffixes must not be empty".into());
        }
        if self.binding_suffixes.iter().any(|s| s.trim().is_empty()) {
            errors.push("binding_suffixes must not contain blank entries".into());
        }

        if self.resources.base_name.trim().is_empty() {
            errors.push("resources.base_name must not be blank".into());
        }
        if self.resources.base_name.contains('.') {
            errors.push(format!(
                "resources.base_name must not contain '.', got '{}'",
                self.resources.base_name
            ));
        }

        errors
    }

    /// Validate, returning [`ConfigError::Validation`] on problems.
    #[cfg(feature = "resource-files")]
    pub fn validated(self) -> std::result::Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    pub fn default_culture(&self) -> Result<Culture> {
        Culture::new(&self.default_culture)
    }

    pub fn key_deriver(&self) -> Result<KeyDeriver> {
        KeyDeriver::new(
            self.view_model_suffix.as_str(),
            self.binding_suffixes.iter().map(String::as_str),
        )
    }
}
