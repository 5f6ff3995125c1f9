//! Catalog Entries and Display-Name Resolution

use serde::{Deserialize, Serialize};

/// Sentinel returned by every lookup that cannot be answered.
pub const UNKNOWN: &str = "Unknown";

/// Category recorded for assets without an `itemCategory` field.
pub const UNKNOWN_CATEGORY: &str = "unknown";

// ============================================================================
// CatalogEntry
// ============================================================================

/// One discovered asset.
///
/// Serialized field names (`guid`, `filename`, `save_id`, `name`,
/// `category`) are the interchange format read by the extractors. Absent
/// optional fields serialize as `null` so every record has the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// 32-char hex engine identifier from the companion metadata file.
    #[serde(rename = "guid", default)]
    pub identifier: Option<String>,

    /// Asset base file name without extension; never empty.
    #[serde(rename = "filename")]
    pub file_reference: String,

    /// Save-system key such as `item_042`.
    #[serde(rename = "save_id", default)]
    pub semantic_key: Option<String>,

    /// Resolved human-readable name.
    #[serde(rename = "name", default = "unknown_name")]
    pub display_name: String,

    #[serde(default = "unknown_category")]
    pub category: String,
}

fn unknown_name() -> String {
    UNKNOWN.to_string()
}

fn unknown_category() -> String {
    UNKNOWN_CATEGORY.to_string()
}

impl CatalogEntry {
    /// Entry known only by its file reference.
    pub fn new(file_reference: impl Into<String>) -> Self {
        let file_reference = file_reference.into();
        Self {
            identifier: None,
            display_name: file_reference.clone(),
            file_reference,
            semantic_key: None,
            category: unknown_category(),
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_semantic_key(mut self, semantic_key: impl Into<String>) -> Self {
        self.semantic_key = Some(semantic_key.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Replace empty optional strings with `None`.
    ///
    /// Older interchange files wrote `""` instead of `null`.
    pub(crate) fn normalized(mut self) -> Self {
        self.identifier = self.identifier.filter(|s| !s.is_empty());
        self.semantic_key = self.semantic_key.filter(|s| !s.is_empty());
        if self.display_name.is_empty() {
            self.display_name = unknown_name();
        }
        if self.category.is_empty() {
            self.category = unknown_category();
        }
        self
    }
}

// ============================================================================
// Display-Name Fallback Chain
// ============================================================================

/// Which source produced a display name, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NameSource {
    /// Localization table entry for a player-visible item key.
    Localized,
    /// Embedded `itemName:` field.
    ItemName,
    /// Embedded `m_Name:` field.
    ObjectName,
    /// The asset's file reference.
    FileReference,
    /// Nothing usable; the `"Unknown"` sentinel.
    Sentinel,
}

impl NameSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Localized => "localized",
            Self::ItemName => "itemName",
            Self::ObjectName => "m_Name",
            Self::FileReference => "file reference",
            Self::Sentinel => "sentinel",
        }
    }
}

/// Every candidate for an entry's display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameSources<'a> {
    pub localized: Option<&'a str>,
    pub item_name: Option<&'a str>,
    pub object_name: Option<&'a str>,
    pub file_reference: &'a str,
}

impl NameSources<'_> {
    /// Resolve the display name.
    ///
    /// The order is fixed: localized name, `itemName`, `m_Name`, file
    /// reference, `"Unknown"`. Blank candidates are skipped.
    pub fn resolve(&self) -> (String, NameSource) {
        let candidates = [
            (self.localized, NameSource::Localized),
            (self.item_name, NameSource::ItemName),
            (self.object_name, NameSource::ObjectName),
            (Some(self.file_reference), NameSource::FileReference),
        ];

        candidates
            .into_iter()
            .find_map(|(candidate, source)| {
                candidate
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_string(), source))
            })
            .unwrap_or_else(|| (UNKNOWN.to_string(), NameSource::Sentinel))
    }
}
