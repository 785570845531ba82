//! Path expression parsing.
//!
//! A path expression addresses a field inside a nested payload, e.g.
//! `user.token`, `items[0].key`, `headers['set-cookie']`, or
//! `accounts[*].secret`. Expressions are lexed once, at configuration
//! time, into a flat list of [`Segment`]s.
//!
//! The grammar is deliberately permissive. Whenever no token matches at
//! the current position, the entire remainder becomes a single literal
//! key, so odd key names (`cache:hits`, `a b`) work without quoting and
//! no non-empty expression is ever rejected.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RedactError, Result};

/// One addressing step of a parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal map key, or a canonical digit string addressing a sequence
    /// index.
    Key(String),
    /// Bracket index: a sequence position, or the map key spelled with the
    /// same digits.
    Index(usize),
    /// Wildcard over every member of a map or sequence.
    Wild,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(idx) => write!(f, "[{}]", idx),
            Segment::Wild => write!(f, "*"),
        }
    }
}

// An identifier (or bare wildcard) is only a segment of its own when a
// separator or the end of the expression follows; the second group keeps
// the separator out of the consumed text.
static IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_0-9]+|\*)([.\[]|$)").expect("valid identifier pattern"));

static BRACKET_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([0-9]+)\]").expect("valid index pattern"));

static BRACKET_QUOTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[(?:'([^']*)'|"([^"]*)")\]"#).expect("valid quoted-key pattern")
});

/// Parse a path expression into its segments.
///
/// Fails only for an empty expression. Every other input produces at
/// least one segment.
pub fn parse_path(expr: &str) -> Result<Vec<Segment>> {
    if expr.is_empty() {
        return Err(RedactError::EmptyPath);
    }

    let mut segments = Vec::new();
    let mut rest = expr;
    while !rest.is_empty() {
        rest = rest.trim_start_matches(['.', ']']);
        if rest.is_empty() {
            break;
        }
        match next_segment(rest) {
            Some((segment, consumed)) => {
                segments.push(segment);
                rest = &rest[consumed..];
            }
            None => {
                segments.push(Segment::Key(rest.to_string()));
                rest = "";
            }
        }
    }

    // Expressions made entirely of separators still name a key.
    if segments.is_empty() {
        segments.push(Segment::Key(expr.to_string()));
    }
    Ok(segments)
}

/// Match one segment at the head of `rest`. Bracket forms take priority
/// over identifiers; `None` triggers the whole-remainder-as-key fallback.
fn next_segment(rest: &str) -> Option<(Segment, usize)> {
    if rest.starts_with("[*]") {
        return Some((Segment::Wild, 3));
    }
    if let Some(caps) = BRACKET_INDEX.captures(rest) {
        let all = caps.get(0).expect("whole match");
        // An index too large to represent degrades to a literal key.
        let idx: usize = caps[1].parse().ok()?;
        return Some((Segment::Index(idx), all.end()));
    }
    if let Some(caps) = BRACKET_QUOTED.captures(rest) {
        let all = caps.get(0).expect("whole match");
        let key = caps
            .get(1)
            .or_else(|| caps.get(2))
            .expect("one quoted alternative")
            .as_str();
        return Some((Segment::Key(key.to_string()), all.end()));
    }
    if let Some(caps) = IDENT.captures(rest) {
        let token = caps.get(1).expect("identifier group");
        let segment = match token.as_str() {
            "*" => Segment::Wild,
            ident => Segment::Key(ident.to_string()),
        };
        return Some((segment, token.end()));
    }
    None
}
