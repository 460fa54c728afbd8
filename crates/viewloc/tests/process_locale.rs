//! The process-wide ambient locale before any coordinator touches it.
//!
//! Kept in its own test binary: nothing else here may apply a culture to
//! the process locale.

use viewloc::{
    AmbientLocale, Culture, LocalizationCoordinator, LocalizedTexts, ProcessLocale, TextCatalog,
    detect_system_culture,
};

#[test]
fn process_locale_follows_system_then_coordinator() {
    let system = detect_system_culture();
    assert!(!system.is_invariant());
    assert_eq!(ProcessLocale.current(), system);

    let texts = LocalizedTexts::new(TextCatalog::new());
    assert_eq!(texts.active_culture(), system);

    let mut catalog = TextCatalog::new().with_parent_fallback(false);
    catalog.insert(&Culture::new("de-DE").unwrap(), "OftenUsedWords_Cancel", "Abbrechen");
    let coordinator = LocalizationCoordinator::new(catalog);
    assert_eq!(coordinator.current_culture().name(), "de-DE");
    assert_eq!(ProcessLocale.current().name(), "de-DE");
    assert_eq!(
        coordinator.texts().resolve("OftenUsedWords_Cancel").unwrap(),
        "Abbrechen"
    );
}
