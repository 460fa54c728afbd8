#![no_main]

use libfuzzer_sys::fuzz_target;
use viewloc::Culture;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(culture) = Culture::new(text) else {
        return;
    };

    // Normalization is idempotent.
    let again = Culture::new(culture.name()).expect("normalized name re-parses");
    assert_eq!(again, culture);

    // The parent chain is finite and ends at the invariant culture.
    let chain: Vec<Culture> = culture.fallback_chain().collect();
    assert!(chain.len() <= culture.name().split('-').count() + 1);
    assert!(chain.last().is_some_and(Culture::is_invariant));
});
