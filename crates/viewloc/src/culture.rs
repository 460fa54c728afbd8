#![forbid(unsafe_code)]

//! Culture identifiers.
//!
//! A [`Culture`] names the language/region whose translated texts are
//! active (`"de-DE"`, `"en"`, ...). It is an immutable value compared by
//! ordinal name equality, so `"de-DE"` and `"de-de"` are different cultures.
//!
//! Names are normalized on construction the way POSIX locale variables are
//! usually written: `fr_FR.UTF-8@euro` becomes `fr-FR`.

use std::env;
use std::fmt;

use crate::error::{L10nError, Result};

/// Fallback used when the environment does not name a usable locale.
pub const FALLBACK_CULTURE: &str = "en-US";

/// A language/region identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Culture {
    name: String,
}

impl Culture {
    /// Parse and normalize a culture name.
    ///
    /// Fails with [`L10nError::InvalidArgument`] for blank input and for
    /// names containing anything other than ASCII alphanumerics and `-`
    /// after normalization.
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let raw = name.as_ref();
        let normalized = normalize(raw).ok_or_else(|| L10nError::blank("culture"))?;
        if let Some(bad) = normalized
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
        {
            return Err(L10nError::invalid(format!(
                "culture name '{raw}' contains invalid character '{bad}'"
            )));
        }
        if normalized.starts_with('-') || normalized.ends_with('-') || normalized.contains("--") {
            return Err(L10nError::invalid(format!(
                "culture name '{raw}' has an empty subtag"
            )));
        }
        Ok(Self { name: normalized })
    }

    /// The culture-neutral partition (empty name).
    #[must_use]
    pub const fn invariant() -> Self {
        Self {
            name: String::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    /// Primary language subtag (`"de"` for `"de-DE"`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.name.split('-').next().unwrap_or("")
    }

    /// Next culture in the resource fallback chain.
    ///
    /// `de-CH-1996` → `de-CH` → `de` → invariant → `None`.
    #[must_use]
    pub fn parent(&self) -> Option<Culture> {
        if self.is_invariant() {
            return None;
        }
        match self.name.rfind('-') {
            Some(idx) => Some(Self {
                name: self.name[..idx].to_string(),
            }),
            None => Some(Self::invariant()),
        }
    }

    /// This culture followed by all of its parents, ending with invariant.
    pub fn fallback_chain(&self) -> impl Iterator<Item = Culture> {
        std::iter::successors(Some(self.clone()), Culture::parent)
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            f.write_str("(invariant)")
        } else {
            f.write_str(&self.name)
        }
    }
}

impl fmt::Debug for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Culture").field(&self.name).finish()
    }
}

impl std::str::FromStr for Culture {
    type Err = L10nError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Culture {
    type Error = L10nError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl AsRef<str> for Culture {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// Detect the system culture from environment variables.
///
/// Preference order: `LC_ALL`, then `LANG`. Falls back to
/// [`FALLBACK_CULTURE`] when neither yields a usable name.
#[must_use]
pub fn detect_system_culture() -> Culture {
    let lc_all = env::var("LC_ALL").ok();
    let lang = env::var("LANG").ok();
    detect_system_culture_from(lc_all.as_deref(), lang.as_deref())
}

fn detect_system_culture_from(lc_all: Option<&str>, lang: Option<&str>) -> Culture {
    let usable = |raw: &str| {
        Culture::new(raw).ok().filter(|culture| {
            !culture.name.eq_ignore_ascii_case("c") && !culture.name.eq_ignore_ascii_case("posix")
        })
    };
    lc_all
        .and_then(usable)
        .or_else(|| lang.and_then(usable))
        .unwrap_or_else(|| Culture {
            name: FALLBACK_CULTURE.to_string(),
        })
}

fn normalize(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw);
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_posix_style_names() {
        let culture = Culture::new("fr_FR.UTF-8@euro").unwrap();
        assert_eq!(culture.name(), "fr-FR");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(Culture::new("").unwrap_err().is_invalid_argument());
        assert!(Culture::new("   ").unwrap_err().is_invalid_argument());
        assert!(Culture::new(".UTF-8").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert!(Culture::new("de DE").unwrap_err().is_invalid_argument());
        assert!(Culture::new("de/DE").unwrap_err().is_invalid_argument());
        assert!(Culture::new("de--DE").unwrap_err().is_invalid_argument());
        assert!(Culture::new("-de").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn equality_is_ordinal() {
        let a = Culture::new("de-DE").unwrap();
        let b = Culture::new("de_DE").unwrap();
        let c = Culture::new("de-de").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn parent_chain_ends_with_invariant() {
        let chain: Vec<String> = Culture::new("de-CH-1996")
            .unwrap()
            .fallback_chain()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(chain, vec!["de-CH-1996", "de-CH", "de", ""]);
        assert_eq!(Culture::invariant().parent(), None);
    }

    #[test]
    fn language_subtag() {
        assert_eq!(Culture::new("pt-BR").unwrap().language(), "pt");
        assert_eq!(Culture::new("ja").unwrap().language(), "ja");
    }

    #[test]
    fn display_marks_invariant() {
        assert_eq!(Culture::invariant().to_string(), "(invariant)");
        assert_eq!(Culture::new("en-GB").unwrap().to_string(), "en-GB");
    }

    #[test]
    fn detect_prefers_lc_all() {
        let culture = detect_system_culture_from(Some("fr_FR.UTF-8"), Some("en_US.UTF-8"));
        assert_eq!(culture.name(), "fr-FR");
    }

    #[test]
    fn detect_uses_lang_when_lc_all_missing() {
        let culture = detect_system_culture_from(None, Some("de_AT.UTF-8"));
        assert_eq!(culture.name(), "de-AT");
    }

    #[test]
    fn detect_falls_back_for_posix_and_missing() {
        assert_eq!(
            detect_system_culture_from(Some("C"), None).name(),
            FALLBACK_CULTURE
        );
        assert_eq!(
            detect_system_culture_from(None, Some("POSIX")).name(),
            FALLBACK_CULTURE
        );
        assert_eq!(detect_system_culture_from(None, None).name(), FALLBACK_CULTURE);
    }

    #[test]
    fn detect_skips_posix_lc_all_in_favor_of_lang() {
        let culture = detect_system_culture_from(Some("C"), Some("nl_NL.UTF-8"));
        assert_eq!(culture.name(), "nl-NL");
    }
}
