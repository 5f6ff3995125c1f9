//! Structured Asset Documents
//!
//! For extractors that need nested data (store sets, attachment lists) the
//! tag-stripped asset text is parsed as YAML and the engine's top-level
//! `MonoBehaviour` block is exposed through a few typed accessors.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};

use super::preprocess::strip_structural_tags;

/// Top-level block holding the scripted object's serialized fields.
const BEHAVIOUR_KEY: &str = "MonoBehaviour";

/// Unquoted reference identifier: `guid: 0123...`. Hex identifiers made of
/// digits (or digits and one `e`) would otherwise load as numbers.
static BARE_GUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\bguid:[ \t]*)([0-9a-fA-F]{32})\b").expect("Failed to compile guid scalar regex")
});

/// A parsed asset; accessors read from the `MonoBehaviour` block.
#[derive(Debug, Clone)]
pub struct AssetDocument {
    behaviour: Mapping,
}

impl AssetDocument {
    /// Parse raw asset text.
    ///
    /// Structural tags and `%` directive lines are removed first and reference
    /// identifiers are quoted so they always load as strings. When the
    /// text holds several documents the first one with a `MonoBehaviour`
    /// block is used; a document without one yields an empty block.
    pub fn parse(raw: &str) -> Result<Self, serde_yaml_ng::Error> {
        let stripped = strip_structural_tags(raw);
        let quoted = BARE_GUID.replace_all(&stripped, "${1}\"${2}\"");
        let body: String = quoted
            .lines()
            .filter(|line| !line.starts_with('%'))
            .collect::<Vec<_>>()
            .join("\n");

        let mut first_behaviour = None;
        for document in serde_yaml_ng::Deserializer::from_str(&body) {
            let value = Value::deserialize(document)?;
            if let Some(Value::Mapping(behaviour)) = value.get(BEHAVIOUR_KEY) {
                first_behaviour = Some(behaviour.clone());
                break;
            }
        }

        Ok(Self {
            behaviour: first_behaviour.unwrap_or_default(),
        })
    }

    /// Raw field value.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.behaviour.get(key)
    }

    /// String field; numbers and booleans are rendered as text.
    pub fn str_field(&self, key: &str) -> Option<String> {
        match self.field(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numeric field; numeric strings are accepted.
    pub fn f64_field(&self, key: &str) -> Option<f64> {
        match self.field(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn i64_field(&self, key: &str) -> Option<i64> {
        match self.field(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Engine flags are serialized as `0`/`1`; `true`/`false` are accepted too.
    pub fn flag_field(&self, key: &str) -> bool {
        match self.field(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0) != 0,
            _ => false,
        }
    }

    /// Identifier of an object reference field: `{fileID: .., guid: .., type: ..}`.
    pub fn guid_ref(&self, key: &str) -> Option<String> {
        reference_guid(self.field(key)?)
    }

    /// Identifiers of every reference in a sequence field, in order.
    pub fn guid_refs(&self, key: &str) -> Vec<String> {
        match self.field(key) {
            Some(Value::Sequence(items)) => items.iter().filter_map(reference_guid).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.behaviour.is_empty()
    }
}

/// Read the `guid` out of a reference mapping.
pub fn reference_guid(value: &Value) -> Option<String> {
    match value.get("guid")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
