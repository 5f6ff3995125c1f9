//! Known-Field Extraction
//!
//! Light pattern matching over (tag-stripped) asset text. Only the handful of
//! fields the catalog needs are extracted; a field that does not match is
//! simply absent.
//!
//! | Field          | Asset key        | Meaning                          |
//! |----------------|------------------|----------------------------------|
//! | identifier     | `guid:` (meta)   | 32-char hex engine identifier    |
//! | semantic key   | `saveID:`        | save-system key, e.g. `item_042` |
//! | item name      | `itemName:`      | designer-facing item name        |
//! | object name    | `m_Name:`        | generic engine object name       |
//! | category       | `itemCategory:`  | item classification              |

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Regex Patterns
// ============================================================================

/// Identifier inside a companion metadata file: `guid: 0123abcd...` (32 hex)
static IDENTIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"guid:\s*([a-f0-9]{32})\b").expect("Failed to compile identifier regex")
});

static SAVE_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*saveID:[ \t]*(\w+)").expect("Failed to compile saveID regex")
});

static ITEM_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*itemName:[ \t]*(.*?)[ \t]*\r?$")
        .expect("Failed to compile itemName regex")
});

static OBJECT_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*m_Name:[ \t]*(.*?)[ \t]*\r?$").expect("Failed to compile m_Name regex")
});

static CATEGORY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*itemCategory:[ \t]*(\w+)")
        .expect("Failed to compile itemCategory regex")
});

// ============================================================================
// Extraction
// ============================================================================

/// Extract the engine identifier from companion metadata text.
pub fn extract_identifier(meta_text: &str) -> Option<String> {
    IDENTIFIER_PATTERN
        .captures(meta_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The catalog-relevant fields scraped from one primary asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFields {
    pub semantic_key: Option<String>,
    pub item_name: Option<String>,
    pub object_name: Option<String>,
    pub category: Option<String>,
}

impl AssetFields {
    /// Scan asset text for the known fields.
    ///
    /// The text is expected to be tag-stripped already. The first occurrence
    /// of each field wins.
    pub fn scan(text: &str) -> Self {
        Self {
            semantic_key: first_capture(&SAVE_ID_PATTERN, text),
            item_name: first_capture(&ITEM_NAME_PATTERN, text),
            object_name: first_capture(&OBJECT_NAME_PATTERN, text),
            category: first_capture(&CATEGORY_PATTERN, text),
        }
    }

    /// True when none of the fields were found.
    pub fn is_empty(&self) -> bool {
        self.semantic_key.is_none()
            && self.item_name.is_none()
            && self.object_name.is_none()
            && self.category.is_none()
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| unquote(m.as_str()))
        .filter(|value| !value.is_empty())
}

/// Strip one pair of matching YAML scalar quotes.
fn unquote(value: &str) -> String {
    let value = value.trim();
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}
