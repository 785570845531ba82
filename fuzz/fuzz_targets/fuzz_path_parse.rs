//! Fuzz target for path expression parsing.
//!
//! Tests that the path lexer handles arbitrary input without panicking:
//! every non-empty string must parse to at least one segment.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lv_redact::parse_path;

fuzz_target!(|expr: &str| {
    match parse_path(expr) {
        Ok(segments) => assert!(!segments.is_empty()),
        Err(_) => assert!(expr.is_empty()),
    }
});
