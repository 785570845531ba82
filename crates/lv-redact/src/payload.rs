//! Shared payload value model.
//!
//! Log payloads are nested, heterogeneous values. Redaction rewrites at
//! most a handful of fields per entry, so the tree is built from `Arc`
//! nodes: replacing one child shallow-clones its parent and reuses every
//! sibling by reference. "Same reference" in the redaction contracts means
//! `Arc::ptr_eq` on [`PayloadRef`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::path::Segment;

/// Reference-counted payload node.
pub type PayloadRef = Arc<Payload>;

/// A nested log payload value.
///
/// Serializes as plain JSON; the sharing is an in-memory property only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Seq(Vec<PayloadRef>),
    Map(BTreeMap<String, PayloadRef>),
}

impl Payload {
    /// Wrap a JSON value as a shared payload root.
    pub fn shared(value: Value) -> PayloadRef {
        Arc::new(Payload::from(value))
    }

    /// Render this payload back into a plain JSON value.
    pub fn to_json(&self) -> Value {
        Value::from(self)
    }

    /// Whether this value can hold children.
    pub fn is_container(&self) -> bool {
        matches!(self, Payload::Seq(_) | Payload::Map(_))
    }

    /// Whether a key or index is directly present on this value.
    ///
    /// Scalars and nulls own nothing; an out-of-bounds index is not owned.
    /// This is a direct-membership query, never a fallible lookup.
    pub fn owns(&self, segment: &Segment) -> bool {
        self.child(segment).is_some()
    }

    /// Borrow the child addressed by one path segment, if owned.
    pub(crate) fn child(&self, segment: &Segment) -> Option<&PayloadRef> {
        match (self, segment) {
            (Payload::Map(map), Segment::Key(key)) => map.get(key),
            (Payload::Map(map), Segment::Index(idx)) => map.get(idx.to_string().as_str()),
            (Payload::Seq(items), Segment::Index(idx)) => items.get(*idx),
            (Payload::Seq(items), Segment::Key(key)) => {
                seq_index(key).and_then(|idx| items.get(idx))
            }
            _ => None,
        }
    }

    /// Shallow clone with the addressed child replaced.
    ///
    /// Siblings are reused by reference. Callers must have checked
    /// ownership via [`Payload::child`]; an unowned segment clones the
    /// value unchanged.
    pub(crate) fn with_child(&self, segment: &Segment, child: PayloadRef) -> Payload {
        match (self, segment) {
            (Payload::Map(map), Segment::Key(key)) => {
                let mut next = map.clone();
                next.insert(key.clone(), child);
                Payload::Map(next)
            }
            (Payload::Map(map), Segment::Index(idx)) => {
                let mut next = map.clone();
                next.insert(idx.to_string(), child);
                Payload::Map(next)
            }
            (Payload::Seq(items), Segment::Index(idx)) if *idx < items.len() => {
                let mut next = items.clone();
                next[*idx] = child;
                Payload::Seq(next)
            }
            (Payload::Seq(items), Segment::Key(key)) => {
                match seq_index(key).filter(|idx| *idx < items.len()) {
                    Some(idx) => {
                        let mut next = items.clone();
                        next[idx] = child;
                        Payload::Seq(next)
                    }
                    None => self.clone(),
                }
            }
            _ => self.clone(),
        }
    }
}

/// Canonical sequence index for a string key: ASCII digits, no sign, no
/// leading zeros (other than `"0"` itself).
fn seq_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Null,
            Value::Bool(b) => Payload::Bool(b),
            Value::Number(n) => Payload::Number(n),
            Value::String(s) => Payload::String(s),
            Value::Array(items) => {
                Payload::Seq(items.into_iter().map(|v| Arc::new(Payload::from(v))).collect())
            }
            Value::Object(map) => Payload::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Arc::new(Payload::from(v))))
                    .collect(),
            ),
        }
    }
}

impl From<&Payload> for Value {
    fn from(payload: &Payload) -> Self {
        match payload {
            Payload::Null => Value::Null,
            Payload::Bool(b) => Value::Bool(*b),
            Payload::Number(n) => Value::Number(n.clone()),
            Payload::String(s) => Value::String(s.clone()),
            Payload::Seq(items) => Value::Array(items.iter().map(|c| Value::from(&**c)).collect()),
            Payload::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, c)| (k.clone(), Value::from(&**c)))
                    .collect(),
            ),
        }
    }
}
