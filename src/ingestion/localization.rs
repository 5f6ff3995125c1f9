//! Localization Tables
//!
//! Localization text assets embed one brace-delimited record per entry inside
//! otherwise free text, e.g.
//!
//! ```text
//! //ITEM_042
//! { "itemKey": "item_042", "itemName": "Iron Sword", "itemDescription": "Sharp." }
//! ```
//!
//! A record is keyed by its first field whose name ends in `Key` (`itemKey`,
//! `emailKey`, ...) and named by its first field ending in `Name`. Records
//! without a key are kept for iteration but cannot be looked up.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// One brace-delimited record (no nesting in localization assets).
static RECORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^{}]*\}").expect("Failed to compile localization record regex")
});

/// `"field": "value"` with backslash escapes allowed inside the value.
static FIELD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(\w+)"\s*:\s*"((?:[^"\\]|\\.)*)""#)
        .expect("Failed to compile localization field regex")
});

// ============================================================================
// LocalizationRecord
// ============================================================================

/// A single `{ "field": "value", ... }` record, fields in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizationRecord {
    fields: IndexMap<String, String>,
}

impl LocalizationRecord {
    fn parse(block: &str) -> Option<Self> {
        let fields: IndexMap<String, String> = FIELD_PATTERN
            .captures_iter(block)
            .map(|caps| (caps[1].to_string(), caps[2].replace("\\\"", "\"")))
            .collect();

        if fields.is_empty() {
            None
        } else {
            Some(Self { fields })
        }
    }

    /// Raw value of a named field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The record key (`itemKey`, `emailKey`, `key`, ...).
    pub fn key(&self) -> Option<&str> {
        self.first_field_with_suffix("Key", "key")
    }

    /// The localized display name (`itemName`, `name`, ...).
    pub fn name(&self) -> Option<&str> {
        self.first_field_with_suffix("Name", "name")
    }

    fn first_field_with_suffix(&self, suffix: &str, bare: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, value)| {
                (field.as_str() == bare || field.ends_with(suffix)) && !value.is_empty()
            })
            .map(|(_, value)| value.as_str())
    }
}

// ============================================================================
// LocalizationTable
// ============================================================================

/// All records of one localization asset, indexed by record key.
#[derive(Debug, Clone, Default)]
pub struct LocalizationTable {
    records: Vec<LocalizationRecord>,
    by_key: HashMap<String, usize>,
}

impl LocalizationTable {
    /// Read and parse a localization file.
    ///
    /// Any I/O failure (missing file, non-UTF-8 content) is returned to the
    /// caller; without localization no meaningful name resolution is possible.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let table = Self::parse(&text);
        log::info!(
            "Loaded {} localization records ({} keyed) from {}",
            table.records.len(),
            table.by_key.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse localization text.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::default();
        for block in RECORD_PATTERN.find_iter(text) {
            let Some(record) = LocalizationRecord::parse(block.as_str()) else {
                continue;
            };
            if let Some(key) = record.key() {
                if table.by_key.insert(key.to_string(), table.records.len()).is_some() {
                    log::warn!("Duplicate localization key '{key}', keeping the later record");
                }
            }
            table.records.push(record);
        }
        table
    }

    /// Record for a key.
    pub fn get(&self, key: &str) -> Option<&LocalizationRecord> {
        self.by_key.get(key).map(|&idx| &self.records[idx])
    }

    /// Localized display name for a key.
    pub fn name_for(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(LocalizationRecord::name)
    }

    /// Every parsed record, keyed or not, in file order.
    pub fn records(&self) -> &[LocalizationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
