//! Fuzz target for the entry wire form.
//!
//! Tests that JSONL entry decoding handles arbitrary input without
//! panicking, and that every decoded entry re-encodes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lv_redact::Entry;

fuzz_target!(|data: &[u8]| {
    if let Ok(entry) = serde_json::from_slice::<Entry>(data) {
        let _ = serde_json::to_string(&entry);
    }
});
