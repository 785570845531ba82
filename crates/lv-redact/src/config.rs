//! Filter configuration.
//!
//! A configuration is either a flat ordered list of path expressions,
//! applied to every entry, or a map from topic to its own ordered list,
//! with `"*"` as the fallback topic. Both shapes are plain JSON and load
//! once at process start.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Redaction filter configuration, loaded once and compiled into a
/// [`Dispatch`](crate::Dispatch) table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterConfig {
    /// Ordered path expressions applied to every entry's payload.
    Paths(Vec<String>),
    /// Path expressions per topic; the key `"*"` catches entries whose
    /// topic has no rule set of its own.
    Topics(BTreeMap<String, Vec<String>>),
}

impl FilterConfig {
    /// Flat configuration from anything yielding path expressions.
    pub fn paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterConfig::Paths(paths.into_iter().map(Into::into).collect())
    }

    /// Per-topic configuration.
    pub fn topics<I, K, P, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterConfig::Topics(
            topics
                .into_iter()
                .map(|(topic, paths)| {
                    (topic.into(), paths.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }

    /// Load a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
