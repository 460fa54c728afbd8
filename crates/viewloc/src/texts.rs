#![forbid(unsafe_code)]

//! Text lookup service.
//!
//! [`LocalizedTexts`] resolves resource keys against a [`TextStore`] in the
//! culture currently held by the [`AmbientLocale`]. It is a pure query layer:
//! no caching, no interpolation, and no fallback beyond what the store itself
//! does.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::ambient::{AmbientLocale, ProcessLocale};
use crate::catalog::TextStore;
use crate::culture::Culture;
use crate::error::{L10nError, Result};
use crate::key::{KeyDeriver, KeyPrefix, ResourceKey};

pub struct LocalizedTexts {
    store: Box<dyn TextStore>,
    deriver: KeyDeriver,
    ambient: Rc<dyn AmbientLocale>,
}

impl fmt::Debug for LocalizedTexts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedTexts")
            .field("deriver", &self.deriver)
            .field("culture", &self.ambient.current())
            .finish_non_exhaustive()
    }
}

impl LocalizedTexts {
    /// Service over `store`, reading the process-wide ambient culture and
    /// using the built-in naming convention.
    pub fn new(store: impl TextStore + 'static) -> Self {
        Self::with_parts(store, KeyDeriver::default(), Rc::new(ProcessLocale))
    }

    pub fn with_parts(
        store: impl TextStore + 'static,
        deriver: KeyDeriver,
        ambient: Rc<dyn AmbientLocale>,
    ) -> Self {
        Self {
            store: Box::new(store),
            deriver,
            ambient,
        }
    }

    #[must_use]
    pub fn deriver(&self) -> &KeyDeriver {
        &self.deriver
    }

    /// Culture lookups currently run against.
    #[must_use]
    pub fn active_culture(&self) -> Culture {
        self.ambient.current()
    }

    /// Text stored under `key`.
    ///
    /// # Errors
    ///
    /// [`L10nError::InvalidArgument`] for a blank key,
    /// [`L10nError::ResourceNotFound`] when the store has no non-blank value.
    pub fn resolve(&self, key: &str) -> Result<String> {
        if key.trim().is_empty() {
            return Err(L10nError::blank("key"));
        }
        let culture = self.ambient.current();
        match self.store.get(key, &culture) {
            Some(text) if !text.trim().is_empty() => {
                trace!(key, culture = %culture, "resolved text resource");
                Ok(text)
            }
            _ => Err(L10nError::ResourceNotFound {
                key: key.to_string(),
                culture: culture.name().to_string(),
            }),
        }
    }

    pub fn resolve_key(&self, key: &ResourceKey) -> Result<String> {
        self.resolve(key.as_str())
    }

    /// Text for a view-model property, keyed by naming convention.
    ///
    /// A property that matches no binding suffix reports
    /// [`L10nError::ResourceNotFound`], same as a missing resource.
    pub fn resolve_for_property(&self, class_name: &str, property_name: &str) -> Result<String> {
        let key = self
            .deriver
            .derive(class_name, property_name)
            .map_err(|e| e.into_lookup_error(self.ambient.current().name()))?;
        self.resolve_key(&key)
    }

    /// [`resolve_for_property`](Self::resolve_for_property) with the class
    /// named by its Rust type.
    pub fn resolve_for<T: ?Sized>(&self, property_name: &str) -> Result<String> {
        self.resolve_for_property(crate::key::short_type_name::<T>(), property_name)
    }

    /// Text for a shared two-part key such as `OftenUsedWords_Cancel`.
    pub fn resolve_two_part(&self, prefix: KeyPrefix, identifier: &str) -> Result<String> {
        let key = ResourceKey::two_part(prefix, identifier)?;
        self.resolve_key(&key)
    }
}
