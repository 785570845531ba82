//! The log entry record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::{Payload, PayloadRef};

/// One structured log entry.
///
/// Paths address the `payload` field; `topic` selects a rule set in a
/// dispatch table and `ns` gates namespaced pipeline stages. The record
/// itself is never mutated: redaction returns either the same payload
/// pointer or a minimal copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Creation time, if the producer stamps one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<DateTime<Utc>>,

    /// Producer namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ns: Option<String>,

    /// Discriminator consulted by dispatch tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// Human-readable message, untouched by redaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    /// Structured payload, the root of path traversal.
    pub payload: PayloadRef,
}

impl Entry {
    /// Create an entry carrying only a payload.
    pub fn new(payload: PayloadRef) -> Self {
        Entry {
            ts: None,
            ns: None,
            topic: None,
            msg: None,
            payload,
        }
    }

    /// Create an entry with an empty map payload.
    pub fn empty() -> Self {
        Entry::new(Payload::shared(serde_json::json!({})))
    }

    /// Set the timestamp.
    pub fn with_ts(mut self, ts: DateTime<Utc>) -> Self {
        self.ts = Some(ts);
        self
    }

    /// Set the namespace.
    pub fn with_ns(mut self, ns: impl Into<String>) -> Self {
        self.ns = Some(ns.into());
        self
    }

    /// Set the topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Set the message.
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let entry = Entry::new(Payload::shared(json!({"key": "value"})))
            .with_topic("input")
            .with_ns("auth")
            .with_msg("login attempt");
        let encoded = serde_json::to_string(&entry).unwrap();
        let decoded: Entry = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let entry = Entry::new(Payload::shared(json!({"k": 1})));
        let encoded = serde_json::to_value(&entry).unwrap();
        assert_eq!(encoded, json!({"payload": {"k": 1}}));
    }

    #[test]
    fn test_minimal_wire_form_parses() {
        let decoded: Entry = serde_json::from_str(r#"{"payload": {"k": 1}}"#).unwrap();
        assert_eq!(decoded.topic, None);
        assert_eq!(decoded.payload.to_json(), json!({"k": 1}));
    }
}
