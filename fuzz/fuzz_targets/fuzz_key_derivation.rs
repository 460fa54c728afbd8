#![no_main]

use libfuzzer_sys::fuzz_target;
use viewloc::KeyDeriver;
use viewloc::key::DEFAULT_BINDING_SUFFIXES;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Split the input into a class name and a property name.
    let (class_name, property_name) = text.split_once('\u{0}').unwrap_or(("FuzzViewModel", text));

    let deriver = KeyDeriver::default();
    let Ok(key) = deriver.derive(class_name, property_name) else {
        return;
    };

    // Post-conditions that must always hold:
    let key = key.as_str();
    assert!(!key.trim().is_empty(), "derived key is blank");
    let suffix = DEFAULT_BINDING_SUFFIXES
        .iter()
        .find(|s| key.ends_with(*s))
        .expect("derived key ends with a binding suffix");
    assert!(property_name.ends_with(suffix), "suffix not taken from the property tail");
    let prefix = class_name.strip_suffix("ViewModel").unwrap_or(class_name);
    assert!(key.starts_with(prefix), "class prefix missing");
});
