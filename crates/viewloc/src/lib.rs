#![forbid(unsafe_code)]

//! Convention-based localization glue for view models.
//!
//! Maps view-model property names to text resource keys, tracks the
//! current culture, and tells registered participants to refresh their
//! texts when the culture changes.
//!
//! # Role
//! `viewloc` is thin glue over a key/text store: a naming convention
//! ([`KeyDeriver`]), a lookup service ([`LocalizedTexts`]), and an observer
//! registry ([`LocalizationCoordinator`]). Storage is behind [`TextStore`];
//! the bundled [`TextCatalog`] covers in-memory and file-backed use.
//!
//! # How it fits together
//! Assigning a culture on the coordinator pushes it into the
//! [`AmbientLocale`], raises [`CultureChanged`], and calls
//! [`Localizable::localize`] on every non-suspended participant, which in
//! turn re-reads its texts through [`LocalizedTexts`].

pub mod ambient;
pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod culture;
pub mod error;
pub mod key;
pub mod participant;
pub mod texts;

pub use ambient::{AmbientLocale, LocaleCell, ProcessLocale};
pub use catalog::{CoverageReport, CultureCoverage, CultureTexts, TextCatalog, TextStore};
pub use config::{LocalizationConfig, ResourceConfig, ResourceFormat};
pub use coordinator::{
    CultureChanged, CultureState, FanOutReport, LocalizationCoordinator, Subscription,
};
pub use culture::{Culture, detect_system_culture};
pub use error::{ConfigError, L10nError, Result};
pub use key::{KeyDeriver, KeyPrefix, ResourceKey, TwoPartKeyBuilder};
pub use participant::{Localizable, LocalizationState, ParticipantId};
pub use texts::LocalizedTexts;
