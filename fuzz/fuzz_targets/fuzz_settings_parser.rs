//! Fuzz target for settings parsing and rule translation.
//!
//! Goal: parsing and resolving settings should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_settings_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        for parsed in [
            branchgate_settings::parse_settings_toml(text),
            branchgate_settings::parse_settings_json(text),
        ] {
            if let Ok(raw) = parsed {
                let _ = branchgate_settings::rule_drafts(&raw);
                let (drafts, _) = branchgate_settings::rule_drafts_lenient(&raw);
                assert_eq!(drafts.len(), 5);
                let _ = branchgate_settings::resolve_config(&raw, Default::default());
            }
        }
    }
});
