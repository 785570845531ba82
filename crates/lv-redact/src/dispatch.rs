//! Topic dispatch over compiled rule sets.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::trace;

use crate::config::FilterConfig;
use crate::entry::Entry;
use crate::error::Result;
use crate::ruleset::RuleSet;

/// Topic key that catches every entry without a rule set of its own.
pub const DEFAULT_TOPIC: &str = "*";

#[derive(Debug, Clone)]
enum Table {
    /// One rule set for every entry, topic ignored.
    All(RuleSet),
    /// Rule set per topic, with an optional `"*"` fallback.
    ByTopic {
        topics: BTreeMap<String, RuleSet>,
        fallback: Option<RuleSet>,
    },
}

/// Immutable dispatch table routing entries to compiled rule sets by
/// topic.
///
/// An entry whose topic has no rule set (and no fallback) passes through
/// untouched; its payload is never even inspected.
#[derive(Debug, Clone)]
pub struct Dispatch {
    table: Table,
}

impl Dispatch {
    /// Compile a configuration into a dispatch table. Fails fast on the
    /// first empty path expression.
    pub fn compile(config: &FilterConfig) -> Result<Self> {
        let table = match config {
            FilterConfig::Paths(paths) => Table::All(RuleSet::compile(paths)?),
            FilterConfig::Topics(map) => {
                let mut topics = BTreeMap::new();
                let mut fallback = None;
                for (topic, paths) in map {
                    let set = RuleSet::compile(paths)?;
                    if topic == DEFAULT_TOPIC {
                        fallback = Some(set);
                    } else {
                        topics.insert(topic.clone(), set);
                    }
                }
                Table::ByTopic { topics, fallback }
            }
        };
        Ok(Dispatch { table })
    }

    /// The rule set an entry with this topic would receive.
    pub fn rule_set_for(&self, topic: Option<&str>) -> Option<&RuleSet> {
        match &self.table {
            Table::All(set) => Some(set),
            Table::ByTopic { topics, fallback } => topic
                .and_then(|t| topics.get(t))
                .or(fallback.as_ref()),
        }
    }

    /// Route one entry through its rule set.
    ///
    /// Returns the entry with the identical payload pointer when nothing
    /// matched, with every other field moved through untouched.
    pub fn apply(&self, entry: Entry) -> Entry {
        let Some(set) = self.rule_set_for(entry.topic.as_deref()) else {
            trace!(topic = entry.topic.as_deref().unwrap_or("-"), "no rule set, passing through");
            return entry;
        };
        let redacted = set.apply(&entry.payload);
        if Arc::ptr_eq(&redacted, &entry.payload) {
            entry
        } else {
            trace!(topic = entry.topic.as_deref().unwrap_or("-"), "payload redacted");
            Entry {
                payload: redacted,
                ..entry
            }
        }
    }
}
