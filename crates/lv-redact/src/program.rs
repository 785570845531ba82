//! Compiled per-path traversal programs.
//!
//! A [`PathProgram`] pairs an existence check with a copy-on-write
//! rewrite for one path expression. Both walk the same segment list; the
//! evaluator is a plain recursive interpreter over [`Segment`], so a
//! program carries no state beyond the parsed path and is freely shared
//! across threads and entries.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::path::{parse_path, Segment};
use crate::payload::{Payload, PayloadRef};
use crate::{MASK, MASK_ALL};

/// One compiled path expression.
#[derive(Debug, Clone)]
pub struct PathProgram {
    expr: String,
    segments: Vec<Segment>,
}

impl PathProgram {
    /// Compile a path expression. Fails only for an empty expression.
    pub fn compile(expr: &str) -> Result<Self> {
        let segments = parse_path(expr)?;
        debug!(path = %expr, segments = segments.len(), "compiled path program");
        Ok(PathProgram {
            expr: expr.to_string(),
            segments,
        })
    }

    /// The source expression this program was compiled from.
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// Whether the path exists in `value`.
    ///
    /// Never panics: descent into scalars, nulls, absent keys, or
    /// out-of-bounds indices is simply not a match.
    pub fn matches(&self, value: &Payload) -> bool {
        matches_at(&self.segments, value)
    }

    /// Rewrite every field addressed by the path to a placeholder.
    ///
    /// Returns the input pointer unchanged when nothing matched;
    /// otherwise a minimal copy sharing every untouched subtree with the
    /// input.
    pub fn redact(&self, value: &PayloadRef) -> PayloadRef {
        redact_at(&self.segments, value)
    }
}

fn matches_at(segments: &[Segment], value: &Payload) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return true;
    };
    match segment {
        Segment::Wild => match value {
            Payload::Seq(items) if rest.is_empty() => !items.is_empty(),
            Payload::Map(map) if rest.is_empty() => !map.is_empty(),
            Payload::Seq(items) => items.iter().any(|child| matches_at(rest, child)),
            Payload::Map(map) => map.values().any(|child| matches_at(rest, child)),
            _ => false,
        },
        _ => match value.child(segment) {
            Some(child) => matches_at(rest, child),
            None => false,
        },
    }
}

fn redact_at(segments: &[Segment], value: &PayloadRef) -> PayloadRef {
    let Some((segment, rest)) = segments.split_first() else {
        // Path consumed: this is the addressed leaf.
        return Arc::new(Payload::String(MASK.to_string()));
    };
    match segment {
        Segment::Wild if rest.is_empty() => mask_members(value),
        Segment::Wild => match &**value {
            Payload::Seq(items) => {
                let mut changed = false;
                let next: Vec<PayloadRef> = items
                    .iter()
                    .map(|child| {
                        let replaced = redact_at(rest, child);
                        changed |= !Arc::ptr_eq(&replaced, child);
                        replaced
                    })
                    .collect();
                if changed {
                    Arc::new(Payload::Seq(next))
                } else {
                    Arc::clone(value)
                }
            }
            Payload::Map(map) => {
                let mut changed = false;
                let next: BTreeMap<String, PayloadRef> = map
                    .iter()
                    .map(|(key, child)| {
                        let replaced = redact_at(rest, child);
                        changed |= !Arc::ptr_eq(&replaced, child);
                        (key.clone(), replaced)
                    })
                    .collect();
                if changed {
                    Arc::new(Payload::Map(next))
                } else {
                    Arc::clone(value)
                }
            }
            _ => Arc::clone(value),
        },
        _ => {
            let Some(child) = value.child(segment) else {
                return Arc::clone(value);
            };
            let replaced = redact_at(rest, child);
            if Arc::ptr_eq(&replaced, child) {
                return Arc::clone(value);
            }
            Arc::new(value.with_child(segment, replaced))
        }
    }
}

/// Terminal wildcard: mask every member, keeping sequence length and map
/// key set. The empty container has nothing to mask and keeps its
/// pointer.
fn mask_members(value: &PayloadRef) -> PayloadRef {
    match &**value {
        Payload::Seq(items) if !items.is_empty() => {
            let fill = Arc::new(Payload::String(MASK_ALL.to_string()));
            Arc::new(Payload::Seq(items.iter().map(|_| Arc::clone(&fill)).collect()))
        }
        Payload::Map(map) if !map.is_empty() => {
            let fill = Arc::new(Payload::String(MASK_ALL.to_string()));
            Arc::new(Payload::Map(
                map.keys().map(|key| (key.clone(), Arc::clone(&fill))).collect(),
            ))
        }
        _ => Arc::clone(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn program(expr: &str) -> PathProgram {
        PathProgram::compile(expr).unwrap()
    }

    #[test]
    fn test_terminal_key_replaced_with_mask() {
        let payload = Payload::shared(json!({"key": "value"}));
        let out = program("key").redact(&payload);
        assert_eq!(out.to_json(), json!({"key": MASK}));
        assert!(!Arc::ptr_eq(&out, &payload));
    }

    #[test]
    fn test_deep_key() {
        let payload = Payload::shared(json!({"key": {"child": {"deep": "test"}}}));
        let out = program("key.child.deep").redact(&payload);
        assert_eq!(out.to_json(), json!({"key": {"child": {"deep": MASK}}}));
    }

    #[test]
    fn test_missing_deep_key_keeps_pointer() {
        for payload in [
            Payload::shared(json!({"key": "is something else"})),
            Payload::shared(json!({"key": null})),
            Payload::shared(json!({})),
            Payload::shared(json!(null)),
            Payload::shared(json!("scalar root")),
        ] {
            let prog = program("key.child.deep");
            assert!(!prog.matches(&payload));
            let out = prog.redact(&payload);
            assert!(Arc::ptr_eq(&out, &payload));
        }
    }

    #[test]
    fn test_terminal_replaces_whole_subtree() {
        let payload = Payload::shared(json!({"key": {"nested": "structure"}}));
        let out = program("key").redact(&payload);
        assert_eq!(out.to_json(), json!({"key": MASK}));
    }

    #[test]
    fn test_untouched_sibling_shares_pointer() {
        let payload = Payload::shared(json!({"a": "secret", "b": {"big": [1, 2, 3]}}));
        let Payload::Map(original) = &*payload else {
            panic!("expected map");
        };
        let out = program("a").redact(&payload);
        let Payload::Map(out_map) = &*out else {
            panic!("expected map");
        };
        assert!(Arc::ptr_eq(out_map.get("b").unwrap(), original.get("b").unwrap()));
    }

    #[test]
    fn test_index_in_seq() {
        let payload = Payload::shared(json!({"items": ["value"]}));
        let out = program("items[0]").redact(&payload);
        assert_eq!(out.to_json(), json!({"items": [MASK]}));
    }

    #[test]
    fn test_index_out_of_bounds_is_no_match() {
        let payload = Payload::shared(json!({"items": ["value"]}));
        let prog = program("items[1]");
        assert!(!prog.matches(&payload));
        assert!(Arc::ptr_eq(&prog.redact(&payload), &payload));
    }

    #[test]
    fn test_key_inside_seq_element() {
        let payload = Payload::shared(json!({"items": [{"key": "value"}]}));
        let out = program("items[0].key").redact(&payload);
        assert_eq!(out.to_json(), json!({"items": [{"key": MASK}]}));
    }

    #[test]
    fn test_index_addresses_map_key() {
        let payload = Payload::shared(json!({"items": {"0": "value"}}));
        let out = program("items[0]").redact(&payload);
        assert_eq!(out.to_json(), json!({"items": {"0": MASK}}));
    }

    #[test]
    fn test_quoted_key() {
        let payload = Payload::shared(json!({"items": {":a": {"key": "value"}}}));
        let out = program("items[':a'].key").redact(&payload);
        assert_eq!(out.to_json(), json!({"items": {":a": {"key": MASK}}}));
    }

    #[test]
    fn test_wildcard_over_seq_skips_unowning_elements() {
        let payload = Payload::shared(json!({
            "items": [{"text": "visible"}, {"key": "secret"}]
        }));
        let Payload::Map(original) = &*payload else {
            panic!("expected map");
        };
        let Payload::Seq(original_items) = &**original.get("items").unwrap() else {
            panic!("expected seq");
        };

        let out = program("items[*].key").redact(&payload);
        assert_eq!(
            out.to_json(),
            json!({"items": [{"text": "visible"}, {"key": MASK}]})
        );
        let Payload::Map(out_map) = &*out else {
            panic!("expected map");
        };
        let Payload::Seq(out_items) = &**out_map.get("items").unwrap() else {
            panic!("expected seq");
        };
        // The element that never owned `key` is reused by reference.
        assert!(Arc::ptr_eq(&out_items[0], &original_items[0]));
        assert!(!Arc::ptr_eq(&out_items[1], &original_items[1]));
    }

    #[test]
    fn test_wildcard_over_map() {
        let payload = Payload::shared(json!({
            "foo": {"text": "visible", "key": "secret"},
            "bar": {"key": "other"},
        }));
        let out = program("*.key").redact(&payload);
        assert_eq!(
            out.to_json(),
            json!({
                "foo": {"text": "visible", "key": MASK},
                "bar": {"key": MASK},
            })
        );

        // Bracket form behaves identically.
        let out = program("[*].key").redact(&payload);
        assert_eq!(
            out.to_json(),
            json!({
                "foo": {"text": "visible", "key": MASK},
                "bar": {"key": MASK},
            })
        );
    }

    #[test]
    fn test_wildcard_with_no_matching_children_keeps_pointer() {
        let payload = Payload::shared(json!({"items": [{"text": "a"}, {"text": "b"}]}));
        let prog = program("items[*].key");
        assert!(!prog.matches(&payload));
        assert!(Arc::ptr_eq(&prog.redact(&payload), &payload));
    }

    #[test]
    fn test_terminal_wildcard_masks_all_members() {
        let payload = Payload::shared(json!({"items": ["one", "two", "three"]}));
        let out = program("items[*]").redact(&payload);
        assert_eq!(out.to_json(), json!({"items": [MASK_ALL, MASK_ALL, MASK_ALL]}));
    }

    #[test]
    fn test_terminal_wildcard_on_root_map() {
        let payload = Payload::shared(json!({"a": "one", "b": "two", "c": "three"}));
        let out = program("[*]").redact(&payload);
        assert_eq!(
            out.to_json(),
            json!({"a": MASK_ALL, "b": MASK_ALL, "c": MASK_ALL})
        );
    }

    #[test]
    fn test_terminal_wildcard_on_empty_container() {
        for payload in [Payload::shared(json!([])), Payload::shared(json!({}))] {
            let prog = program("[*]");
            assert!(!prog.matches(&payload));
            assert!(Arc::ptr_eq(&prog.redact(&payload), &payload));
        }
    }

    #[test]
    fn test_terminal_wildcard_on_scalar_keeps_pointer() {
        let payload = Payload::shared(json!({"items": "scalar"}));
        let prog = program("items[*]");
        assert!(!prog.matches(&payload));
        assert!(Arc::ptr_eq(&prog.redact(&payload), &payload));
    }

    #[test]
    fn test_redact_is_idempotent() {
        let payload = Payload::shared(json!({"key": "value", "other": 1}));
        let prog = program("key");
        let once = prog.redact(&payload);
        let twice = prog.redact(&once);
        assert_eq!(once.to_json(), twice.to_json());
    }

    #[test]
    fn test_digit_identifier_addresses_seq() {
        let payload = Payload::shared(json!({"items": ["secret", "plain"]}));
        let out = program("items.0").redact(&payload);
        assert_eq!(out.to_json(), json!({"items": [MASK, "plain"]}));
    }
}
