//! The tag options side channel.
//!
//! A diagram may carry standalone definition lines of the form
//! `[tag]: {json}`. The JSON body must be a flat object whose values are
//! strings or small scalars; it is parsed here and stored per tag on the
//! canvas. Keys split in two families:
//!
//! - rendering keys (anything not starting with `a2s:`) pass through to the
//!   renderer as element attributes;
//! - control keys (`a2s:label`, `a2s:delref`, `a2s:link`) direct the
//!   renderer itself. `a2s:type` is reserved and carried but unused.

use std::collections::BTreeMap;

use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// Prefix of keys interpreted by the toolchain rather than passed through.
pub const CONTROL_PREFIX: &str = "a2s:";
/// Replaces the rendered string of the tagged text.
pub const LABEL_KEY: &str = "a2s:label";
/// Any truthy value suppresses rendering of the tagged text itself.
pub const DELREF_KEY: &str = "a2s:delref";
/// Wraps the tagged object in a hyperlink.
pub const LINK_KEY: &str = "a2s:link";

/// Whether a key belongs to the control family.
#[must_use]
pub fn is_control_key(key: &str) -> bool {
    key.starts_with(CONTROL_PREFIX)
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A single option value: a string in the common case, or a bare JSON
/// scalar. Nested objects and arrays are rejected at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    /// The string content, for string values only.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Loose truthiness, used by `a2s:delref`: non-empty, non-`"0"`
    /// strings, non-zero numbers, and `true` count.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty() && s != "0",
            Self::Number(n) => *n != 0.0,
            Self::Bool(b) => *b,
        }
    }

    /// Render the value as an attribute string.
    #[must_use]
    pub fn to_attribute(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Bool(b) => b.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Option sets
// ---------------------------------------------------------------------------

/// The options of one tag: a flat dictionary that preserves the order keys
/// were written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    entries: Vec<(String, Value)>,
}

impl OptionSet {
    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The canvas-wide mapping from tag to its options.
pub type OptionsMap = BTreeMap<String, OptionSet>;

// ---------------------------------------------------------------------------
// Tag definition parsing
// ---------------------------------------------------------------------------

/// Parse the JSON body of a `[tag]: {json}` definition.
///
/// # Errors
///
/// Returns [`ParseErrorKind::BadTagDefinition`] citing the tag and the JSON
/// text when the body does not parse, is not an object, or holds a nested
/// value.
pub(crate) fn parse_tag_definition(tag: &str, json: &str) -> ParseResult<OptionSet> {
    let bad = |detail: String| {
        ParseError::new(
            ParseErrorKind::BadTagDefinition,
            format!("tag [{tag}]: {detail}"),
        )
    };

    let parsed: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| bad(format!("invalid JSON {:?}: {e}", json.trim())))?;

    let serde_json::Value::Object(map) = parsed else {
        return Err(bad(format!("{:?} is not a JSON object", json.trim())));
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => {
                return Err(bad(format!(
                    "value for {key:?} must be a string, number, or boolean"
                )));
            }
        };
        entries.push((key, value));
    }

    Ok(OptionSet { entries })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
