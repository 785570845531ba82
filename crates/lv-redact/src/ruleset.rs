//! Ordered groups of path programs applied to one payload.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::payload::PayloadRef;
use crate::program::PathProgram;

/// An ordered sequence of compiled path programs from one configuration
/// group.
///
/// Programs run in configuration order. Later paths see the output of
/// earlier ones, so a field already masked re-masks harmlessly.
#[derive(Debug, Clone)]
pub struct RuleSet {
    programs: Vec<PathProgram>,
}

impl RuleSet {
    /// Compile every path expression, preserving order.
    pub fn compile<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        let programs = paths
            .iter()
            .map(|path| PathProgram::compile(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        debug!(paths = programs.len(), "compiled rule set");
        Ok(RuleSet { programs })
    }

    /// Number of compiled paths.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether this rule set has no paths at all.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Apply every path to `payload`, threading the working value through.
    ///
    /// A payload untouched by every path comes back pointer-identical.
    /// Each program's existence check gates its rewrite, so unmatched
    /// paths cost no allocation at all.
    pub fn apply(&self, payload: &PayloadRef) -> PayloadRef {
        let mut current = Arc::clone(payload);
        for program in &self.programs {
            if program.matches(&current) {
                current = program.redact(&current);
            }
        }
        current
    }
}
