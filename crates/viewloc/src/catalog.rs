#![forbid(unsafe_code)]

//! Backing text store: key → text, partitioned by culture.
//!
//! [`TextStore`] is the only thing the lookup layer needs from a store.
//! [`TextCatalog`] is the bundled implementation: one [`CultureTexts`] map per
//! culture, optionally walking the culture's parent chain (`de-AT` → `de` →
//! invariant) the way platform resource managers resolve satellite files.
//!
//! With the `resource-files` feature, catalogs load from a directory of flat
//! TOML or JSON files:
//!
//! ```text
//! texts/
//!   Strings.toml         # invariant partition
//!   Strings.de.toml
//!   Strings.de-DE.toml
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::culture::Culture;

/// Read access to localized texts.
pub trait TextStore {
    /// The stored text for `key` in `culture`, if there is a non-blank one.
    fn get(&self, key: &str, culture: &Culture) -> Option<String>;
}

impl<T: TextStore + ?Sized> TextStore for &T {
    fn get(&self, key: &str, culture: &Culture) -> Option<String> {
        (**self).get(key, culture)
    }
}

impl<T: TextStore + ?Sized> TextStore for Rc<T> {
    fn get(&self, key: &str, culture: &Culture) -> Option<String> {
        (**self).get(key, culture)
    }
}

impl<T: TextStore + ?Sized> TextStore for Box<T> {
    fn get(&self, key: &str, culture: &Culture) -> Option<String> {
        (**self).get(key, culture)
    }
}

// ---------------------------------------------------------------------------
// CultureTexts
// ---------------------------------------------------------------------------

/// Texts of a single culture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CultureTexts {
    entries: BTreeMap<String, String>,
}

impl CultureTexts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Non-blank text for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CultureTexts {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// TextCatalog
// ---------------------------------------------------------------------------

/// In-memory [`TextStore`] holding texts for several cultures.
#[derive(Debug, Clone)]
pub struct TextCatalog {
    cultures: BTreeMap<Culture, CultureTexts>,
    parent_fallback: bool,
}

impl Default for TextCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCatalog {
    /// Empty catalog with parent fallback enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cultures: BTreeMap::new(),
            parent_fallback: true,
        }
    }

    /// Whether lookups walk `culture.parent()` when the exact culture misses.
    #[must_use]
    pub fn with_parent_fallback(mut self, enabled: bool) -> Self {
        self.parent_fallback = enabled;
        self
    }

    #[must_use]
    pub fn parent_fallback(&self) -> bool {
        self.parent_fallback
    }

    /// Add or merge texts for `culture`. Later inserts win on duplicate keys.
    pub fn add_culture(&mut self, culture: Culture, texts: CultureTexts) {
        self.cultures
            .entry(culture)
            .or_default()
            .entries
            .extend(texts.entries);
    }

    pub fn insert(&mut self, culture: &Culture, key: impl Into<String>, value: impl Into<String>) {
        self.cultures
            .entry(culture.clone())
            .or_default()
            .insert(key, value);
    }

    #[must_use]
    pub fn culture_texts(&self, culture: &Culture) -> Option<&CultureTexts> {
        self.cultures.get(culture)
    }

    /// Cultures with at least one partition, in name order.
    #[must_use]
    pub fn cultures(&self) -> Vec<Culture> {
        self.cultures.keys().cloned().collect()
    }

    /// Lookup restricted to `culture` itself.
    #[must_use]
    pub fn get_exact(&self, key: &str, culture: &Culture) -> Option<&str> {
        self.cultures.get(culture).and_then(|texts| texts.get(key))
    }

    /// Keys missing per culture, measured against the union of all keys.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let all_keys: BTreeSet<&str> = self
            .cultures
            .values()
            .flat_map(|texts| texts.keys())
            .collect();
        let total_keys = all_keys.len();

        let cultures = self
            .cultures
            .iter()
            .map(|(culture, texts)| {
                let missing: Vec<String> = all_keys
                    .iter()
                    .filter(|key| texts.get(key).is_none())
                    .map(|key| (*key).to_string())
                    .collect();
                let present = total_keys - missing.len();
                let coverage_percent = if total_keys == 0 {
                    100.0
                } else {
                    present as f64 * 100.0 / total_keys as f64
                };
                CultureCoverage {
                    culture: culture.clone(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys,
            cultures,
        }
    }
}

impl TextStore for TextCatalog {
    fn get(&self, key: &str, culture: &Culture) -> Option<String> {
        if !self.parent_fallback {
            return self.get_exact(key, culture).map(str::to_string);
        }
        culture
            .fallback_chain()
            .find_map(|candidate| self.get_exact(key, &candidate).map(str::to_string))
    }
}

/// Per-culture completeness of a [`TextCatalog`].
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub total_keys: usize,
    pub cultures: Vec<CultureCoverage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CultureCoverage {
    pub culture: Culture,
    /// Keys with a non-blank value (blank values count as missing).
    pub present: usize,
    pub missing: Vec<String>,
    pub coverage_percent: f64,
}

// ---------------------------------------------------------------------------
// Resource files
// ---------------------------------------------------------------------------

#[cfg(feature = "resource-files")]
mod files {
    use std::collections::BTreeMap;
    use std::path::Path;

    use tracing::debug;

    use super::{CultureTexts, TextCatalog};
    use crate::config::{ResourceConfig, ResourceFormat};
    use crate::culture::Culture;
    use crate::error::ConfigError;

    impl CultureTexts {
        /// Parse a flat `key = "value"` TOML table.
        pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
            let entries: BTreeMap<String, String> = toml::from_str(s)?;
            Ok(Self { entries })
        }

        /// Parse a flat `{ "key": "value" }` JSON object.
        pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
            let entries: BTreeMap<String, String> = serde_json::from_str(s)?;
            Ok(Self { entries })
        }

        pub fn from_file(path: impl AsRef<Path>, format: ResourceFormat) -> Result<Self, ConfigError> {
            let path = path.as_ref();
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
            match format {
                ResourceFormat::Toml => Self::from_toml_str(&content),
                ResourceFormat::Json => Self::from_json_str(&content),
            }
        }
    }

    impl TextCatalog {
        /// Load every `{base_name}[.{culture}].{ext}` file in the configured
        /// directory. Other files are ignored.
        pub fn load_dir(config: &ResourceConfig) -> Result<Self, ConfigError> {
            let dir = config.directory.as_path();
            let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::io(dir, e))?;
            let mut catalog = Self::new().with_parent_fallback(config.parent_fallback);

            for entry in entries {
                let entry = entry.map_err(|e| ConfigError::io(dir, e))?;
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                let Some(culture) = culture_of(&path, config)? else {
                    continue;
                };
                let texts = CultureTexts::from_file(&path, config.format)?;
                debug!(
                    path = %path.display(),
                    culture = %culture,
                    entries = texts.len(),
                    "loaded text resource file"
                );
                catalog.add_culture(culture, texts);
            }

            Ok(catalog)
        }
    }

    /// Culture encoded in a resource file name, `None` for unrelated files.
    fn culture_of(path: &Path, config: &ResourceConfig) -> Result<Option<Culture>, ConfigError> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let Some(stem) = file_name.strip_suffix(config.format.extension()) else {
            return Ok(None);
        };
        let Some(stem) = stem.strip_suffix('.') else {
            return Ok(None);
        };
        if stem == config.base_name {
            return Ok(Some(Culture::invariant()));
        }
        match stem
            .strip_prefix(config.base_name.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
        {
            Some(name) => Ok(Some(Culture::new(name)?)),
            None => Ok(None),
        }
    }
}
