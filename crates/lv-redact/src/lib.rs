//! Field-level redaction engine for structured log entries.
//!
//! This crate compiles path expressions like `token`, `user.card.number`,
//! or `items[*].secret` into reusable programs that replace the addressed
//! fields of a log entry's payload with fixed placeholder markers. The
//! payload tree is built from shared nodes, so redaction copies only the
//! chain from the root to each replaced field; everything else, including
//! entries that match nothing at all, keeps its original pointers.
//!
//! # Key Properties
//!
//! - **Copy-on-write**: an unmatched payload comes back pointer-identical;
//!   a matched one is a minimal structural copy with untouched subtrees
//!   reused by reference.
//! - **Infallible at runtime**: traversal into missing keys, scalars, or
//!   nulls degrades to "no match". Only compiling an empty path expression
//!   can fail, and that happens before any entry flows.
//! - **Immutable after compile**: programs, rule sets, and dispatch tables
//!   carry no mutable state and are safe to share across threads.
//!
//! # Example
//!
//! ```
//! use lv_redact::{Dispatch, Entry, FilterConfig, Payload, MASK};
//! use serde_json::json;
//!
//! let config = FilterConfig::paths(["password", "auth.token"]);
//! let dispatch = Dispatch::compile(&config).unwrap();
//!
//! let entry = Entry::new(Payload::shared(json!({
//!     "user": "alice",
//!     "password": "hunter2",
//! })));
//! let redacted = dispatch.apply(entry);
//! assert_eq!(
//!     redacted.payload.to_json(),
//!     json!({ "user": "alice", "password": MASK })
//! );
//! ```

pub mod config;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod path;
pub mod payload;
pub mod program;
pub mod ruleset;

pub use config::FilterConfig;
pub use dispatch::{Dispatch, DEFAULT_TOPIC};
pub use entry::Entry;
pub use error::{RedactError, Result};
pub use path::{parse_path, Segment};
pub use payload::{Payload, PayloadRef};
pub use program::PathProgram;
pub use ruleset::RuleSet;

/// Replacement written over a matched leaf value.
pub const MASK: &str = "·····";

/// Replacement written over each member of a wildcard-masked container.
///
/// Deliberately distinct from [`MASK`]: the shorter marker signals "entire
/// value elided" rather than "this specific field was redacted".
pub const MASK_ALL: &str = "···";
