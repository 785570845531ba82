//! Pipeline adapters for lv-redact.
//!
//! This crate wires the redaction engine into an entry-at-a-time
//! processing pipeline:
//! - [`Stage`]: the one-entry-in, one-entry-out contract
//! - [`RedactStage`]: a compiled dispatch table as a stage, optionally
//!   gated on the entry namespace
//! - [`Pipeline`]: linear composition of stages
//! - [`EntryReader`]/[`EntryWriter`]: line-delimited JSON transport
//!
//! Stages are pure and never fail per entry; ordering and backpressure
//! between entries belong to whatever drives the pipeline.

pub mod error;
pub mod io;
pub mod stage;

pub use error::{PipelineError, Result};
pub use io::{EntryReader, EntryWriter};
pub use stage::{Pipeline, RedactStage, Stage};
