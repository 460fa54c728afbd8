#![forbid(unsafe_code)]

//! Text resource keys and the naming convention that derives them.
//!
//! Two key shapes exist:
//!
//! | Shape | Example | Built by |
//! |-------|---------|----------|
//! | class-scoped | `Customer_CustomerName_Text` | [`KeyDeriver::derive`] |
//! | two-part | `OftenUsedWords_Cancel` | [`ResourceKey::two_part`], [`TwoPartKeyBuilder`] |
//!
//! Class-scoped keys come from a view-model class name and a bindable
//! property name: the view-model suffix is stripped from the class, and the
//! property is split into a stem and a recognized binding suffix.
//!
//! ```
//! use viewloc::key::KeyDeriver;
//!
//! let deriver = KeyDeriver::default();
//! let key = deriver.derive("OrderViewModel", "TotalHeader").unwrap();
//! assert_eq!(key.as_str(), "Order_Total_Header");
//! ```

use std::fmt;

use regex_lite::Regex;

use crate::error::{L10nError, Result};

/// Joins the segments of every resource key.
pub const KEY_SEPARATOR: char = '_';

/// Conventional suffix of view-model class names.
pub const DEFAULT_VIEW_MODEL_SUFFIX: &str = "ViewModel";

/// Property-name suffixes of the data-bindable UI texts.
pub const DEFAULT_BINDING_SUFFIXES: &[&str] =
    &["BusyContent", "Caption", "Content", "Header", "Text", "ToolTip"];

/// Rendered in place of a missing identifier by [`TwoPartKeyBuilder`].
pub const IDENTIFIER_NOT_SET: &str = "[ not set ]";

// ---------------------------------------------------------------------------
// ResourceKey
// ---------------------------------------------------------------------------

/// Key of one entry in a text resource file. Never blank.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Wrap an arbitrary key. Fails if `key` is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(L10nError::blank("key"));
        }
        Ok(Self(key))
    }

    /// `Prefix_Identifier` for one of the shared text categories.
    pub fn two_part(prefix: KeyPrefix, identifier: &str) -> Result<Self> {
        if identifier.trim().is_empty() {
            return Err(L10nError::blank("identifier"));
        }
        Ok(Self(format!("{}{KEY_SEPARATOR}{identifier}", prefix.as_str())))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceKey").field(&self.0).finish()
    }
}

impl AsRef<str> for ResourceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ResourceKey> for String {
    fn from(key: ResourceKey) -> Self {
        key.0
    }
}

// ---------------------------------------------------------------------------
// Two-part keys
// ---------------------------------------------------------------------------

/// Categories of texts that are not bound to a view-model property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPrefix {
    ApplicationMessages,
    OftenUsedWords,
    OftenUsedPhrases,
    Shortcuts,
}

impl KeyPrefix {
    pub const ALL: [KeyPrefix; 4] = [
        Self::ApplicationMessages,
        Self::OftenUsedWords,
        Self::OftenUsedPhrases,
        Self::Shortcuts,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplicationMessages => "ApplicationMessages",
            Self::OftenUsedWords => "OftenUsedWords",
            Self::OftenUsedPhrases => "OftenUsedPhrases",
            Self::Shortcuts => "Shortcuts",
        }
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incremental builder for two-part keys.
///
/// Formatting the builder before an identifier is assigned renders
/// `Prefix_[ not set ]`, which makes a forgotten identifier visible in the
/// UI instead of silently looking up the wrong key.
#[derive(Debug, Clone)]
pub struct TwoPartKeyBuilder {
    prefix: KeyPrefix,
    identifier: Option<String>,
}

impl TwoPartKeyBuilder {
    #[must_use]
    pub fn for_prefix(prefix: KeyPrefix) -> Self {
        Self {
            prefix,
            identifier: None,
        }
    }

    #[must_use]
    pub fn prefix(&self) -> KeyPrefix {
        self.prefix
    }

    /// Assign the identifier and return the rendered key.
    pub fn with_identifier(&mut self, identifier: impl Into<String>) -> String {
        self.identifier = Some(identifier.into());
        self.to_string()
    }

    /// Validated key; fails while the identifier is unset or blank.
    pub fn build(&self) -> Result<ResourceKey> {
        ResourceKey::two_part(self.prefix, self.identifier.as_deref().unwrap_or(""))
    }
}

impl fmt::Display for TwoPartKeyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let identifier = self
            .identifier
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(IDENTIFIER_NOT_SET);
        write!(f, "{}{KEY_SEPARATOR}{identifier}", self.prefix)
    }
}

// ---------------------------------------------------------------------------
// KeyDeriver
// ---------------------------------------------------------------------------

/// Derives class-scoped keys from `(ClassName, PropertyName)` pairs.
///
/// The result is `{class without view-model suffix}_{property stem}_{binding suffix}`.
/// The binding suffix must end the property name; when several recognized
/// suffixes fit, the longest one wins.
#[derive(Debug, Clone)]
pub struct KeyDeriver {
    view_model_suffix: String,
    binding_suffixes: Vec<String>,
    pattern: Regex,
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_MODEL_SUFFIX, DEFAULT_BINDING_SUFFIXES.iter().copied())
            .expect("default naming convention is valid")
    }
}

impl KeyDeriver {
    /// Build a deriver for a custom naming convention.
    ///
    /// Blank binding suffixes are rejected, duplicates are dropped, and at
    /// least one suffix is required. An empty `view_model_suffix` keeps class
    /// names unchanged.
    pub fn new<I, S>(view_model_suffix: impl Into<String>, binding_suffixes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut suffixes: Vec<String> = Vec::new();
        for suffix in binding_suffixes {
            let suffix = suffix.into();
            let trimmed = suffix.trim();
            if trimmed.is_empty() {
                return Err(L10nError::blank("binding suffix"));
            }
            if !suffixes.iter().any(|s| s == trimmed) {
                suffixes.push(trimmed.to_string());
            }
        }
        if suffixes.is_empty() {
            return Err(L10nError::invalid("at least one binding suffix is required"));
        }
        Ok(Self {
            view_model_suffix: view_model_suffix.into().trim().to_string(),
            pattern: property_pattern(&suffixes)?,
            binding_suffixes: suffixes,
        })
    }

    #[must_use]
    pub fn view_model_suffix(&self) -> &str {
        &self.view_model_suffix
    }

    #[must_use]
    pub fn binding_suffixes(&self) -> &[String] {
        &self.binding_suffixes
    }

    /// Derive the class-scoped key for `property_name` on `class_name`.
    ///
    /// # Errors
    ///
    /// [`L10nError::InvalidArgument`] for blank names,
    /// [`L10nError::KeyDerivationFailed`] when the property does not end with
    /// a recognized binding suffix.
    pub fn derive(&self, class_name: &str, property_name: &str) -> Result<ResourceKey> {
        if class_name.trim().is_empty() {
            return Err(L10nError::blank("class name"));
        }
        if property_name.trim().is_empty() {
            return Err(L10nError::blank("property name"));
        }

        let prefix = class_name
            .strip_suffix(self.view_model_suffix.as_str())
            .unwrap_or(class_name);

        let captures = self.pattern.captures(property_name).ok_or_else(|| {
            L10nError::KeyDerivationFailed {
                class_name: class_name.to_string(),
                property_name: property_name.to_string(),
            }
        })?;
        let stem = captures.name("stem").map_or("", |m| m.as_str());
        let suffix = captures.name("suffix").map_or("", |m| m.as_str());

        ResourceKey::new(format!(
            "{prefix}{KEY_SEPARATOR}{stem}{KEY_SEPARATOR}{suffix}"
        ))
    }

    /// Like [`derive`](Self::derive), naming the class by its Rust type.
    ///
    /// Module path and generic arguments are dropped, so
    /// `app::views::CustomerViewModel` contributes `Customer`.
    pub fn derive_for<T: ?Sized>(&self, property_name: &str) -> Result<ResourceKey> {
        self.derive(short_type_name::<T>(), property_name)
    }
}

/// Last path segment of `T`'s type name, without generic arguments.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn property_pattern(suffixes: &[String]) -> Result<Regex> {
    let alternatives = suffixes
        .iter()
        .map(|s| regex_lite::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    // Lazy stem: the earliest split that leaves a full suffix at the tail,
    // i.e. the longest matching suffix.
    let source = format!("^(?P<stem>(?s:.*?))(?P<suffix>{alternatives})$");
    Regex::new(&source)
        .map_err(|e| L10nError::invalid(format!("binding suffixes do not form a pattern: {e}")))
}
