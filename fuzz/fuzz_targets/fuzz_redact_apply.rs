//! Fuzz target for rule-set application.
//!
//! Compiles arbitrary strings as path expressions and applies them to
//! arbitrary JSON payloads. Applying compiled rules must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lv_redact::{Payload, RuleSet};

fuzz_target!(|input: (Vec<String>, String)| {
    let (paths, payload_json) = input;
    let paths: Vec<String> = paths.into_iter().filter(|p| !p.is_empty()).collect();
    let Ok(set) = RuleSet::compile(&paths) else {
        return;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&payload_json) else {
        return;
    };
    let payload = Payload::shared(value);
    let once = set.apply(&payload);
    let twice = set.apply(&once);
    assert_eq!(once.to_json(), twice.to_json());
});
