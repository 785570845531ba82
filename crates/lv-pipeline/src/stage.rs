//! Pipeline stages.

use lv_redact::{Dispatch, Entry, FilterConfig};

use crate::error::Result;

/// One processing stage: accepts an entry, produces exactly one entry,
/// possibly the same one.
///
/// Implementations must not panic for any well-formed entry; an entry a
/// stage has nothing to do with passes through unchanged.
pub trait Stage: Send + Sync {
    /// Process one entry.
    fn apply(&self, entry: Entry) -> Entry;
}

/// A compiled dispatch table as a pipeline stage, optionally gated on
/// the entry namespace.
#[derive(Debug)]
pub struct RedactStage {
    dispatch: Dispatch,
    ns: Option<String>,
}

impl RedactStage {
    /// Stage applying `config` to every entry.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        Ok(RedactStage {
            dispatch: Dispatch::compile(config)?,
            ns: None,
        })
    }

    /// Stage applying `config` only to entries whose namespace equals
    /// `ns`. Everything else passes through without touching the
    /// dispatch table at all.
    pub fn namespaced(ns: impl Into<String>, config: &FilterConfig) -> Result<Self> {
        Ok(RedactStage {
            dispatch: Dispatch::compile(config)?,
            ns: Some(ns.into()),
        })
    }
}

impl Stage for RedactStage {
    fn apply(&self, entry: Entry) -> Entry {
        if let Some(ns) = &self.ns {
            if entry.ns.as_deref() != Some(ns.as_str()) {
                return entry;
            }
        }
        self.dispatch.apply(entry)
    }
}

/// Linear composition of stages: each stage's output feeds the next, in
/// the order given. The composed unit is itself a [`Stage`].
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Compose stages left to right.
    pub fn of(stages: Vec<Box<dyn Stage>>) -> Self {
        Pipeline { stages }
    }

    /// Number of composed stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline holds no stages (and thus passes entries
    /// through unchanged).
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Stage for Pipeline {
    fn apply(&self, entry: Entry) -> Entry {
        self.stages
            .iter()
            .fold(entry, |entry, stage| stage.apply(entry))
    }
}
