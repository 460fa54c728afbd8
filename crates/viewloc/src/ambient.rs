#![forbid(unsafe_code)]

//! Ambient locale: the "current culture" read by downstream formatting and
//! text lookups.
//!
//! The coordinator pushes every newly active culture into an
//! [`AmbientLocale`]; [`LocalizedTexts`](crate::texts::LocalizedTexts) reads
//! it back on each lookup. Two stores implement the contract:
//!
//! | Store | Scope | Use case |
//! |-------|-------|----------|
//! | [`ProcessLocale`] | process-wide | **Production default** |
//! | [`LocaleCell`] | per handle (shared by clones) | Tests, embedded coordinators |
//!
//! Both are backed by [`arc_swap::ArcSwap`]: reads are wait-free and never
//! contend with the rare culture switch.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::culture::{Culture, detect_system_culture};

/// Process-wide current-culture setting.
pub trait AmbientLocale {
    /// The culture lookups should use right now.
    fn current(&self) -> Culture;

    /// Make `culture` the ambient culture.
    fn apply(&self, culture: &Culture);
}

static PROCESS_CULTURE: LazyLock<ArcSwap<Culture>> =
    LazyLock::new(|| ArcSwap::from_pointee(detect_system_culture()));

/// Handle to the single process-wide ambient culture.
///
/// Starts out as the operating system's culture (see
/// [`detect_system_culture`]) until a coordinator applies one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLocale;

impl AmbientLocale for ProcessLocale {
    #[inline]
    fn current(&self) -> Culture {
        Culture::clone(&PROCESS_CULTURE.load())
    }

    #[inline]
    fn apply(&self, culture: &Culture) {
        PROCESS_CULTURE.store(Arc::new(culture.clone()));
    }
}

/// Ambient culture confined to one handle and its clones.
#[derive(Debug, Clone)]
pub struct LocaleCell {
    inner: Arc<ArcSwap<Culture>>,
}

impl LocaleCell {
    #[must_use]
    pub fn new(initial: Culture) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// Read without cloning; returns a guard that derefs to the culture.
    pub fn load_ref(&self) -> arc_swap::Guard<Arc<Culture>> {
        self.inner.load()
    }
}

impl Default for LocaleCell {
    fn default() -> Self {
        Self::new(Culture::invariant())
    }
}

impl AmbientLocale for LocaleCell {
    #[inline]
    fn current(&self) -> Culture {
        Culture::clone(&self.inner.load())
    }

    #[inline]
    fn apply(&self, culture: &Culture) {
        self.inner.store(Arc::new(culture.clone()));
    }
}
