//! Identifier Resolution Catalog
//!
//! The catalog reconciles the three naming systems of an asset dump:
//!
//! - **identifier**: the engine's 32-char hex `guid` from `.meta` files
//! - **semantic key**: the save-system `saveID` (`item_042`, `email_intro`)
//! - **file reference**: the asset's base file name
//!
//! and resolves each asset to a display name. It is built once per run by
//! [`CatalogBuilder`], persisted as JSON, and loaded read-only by every
//! extractor.
//!
//! # Lookup Contract
//!
//! Every `resolve_*` method is total: a missing key, or a known entry
//! lacking the requested field, yields [`UNKNOWN`]. All lookups are hash
//! index hits.
//!
//! ```rust,ignore
//! use assetlore::catalog::Catalog;
//!
//! let catalog = Catalog::load("Output/guid_lookup.json")?;
//! let name = catalog.resolve_name("0a1b2c3d4e5f60718293a4b5c6d7e8f9");
//! ```

mod builder;
mod entry;
mod error;
mod persist;

pub use builder::{BuildOutput, BuildReport, BuilderOptions, CatalogBuilder};
pub use entry::{CatalogEntry, NameSource, NameSources, UNKNOWN, UNKNOWN_CATEGORY};
pub use error::{CatalogError, Result};

use std::collections::HashMap;

// ============================================================================
// Catalog
// ============================================================================

/// Immutable resolved mapping table with identifier, semantic-key and
/// file-reference indices.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_identifier: HashMap<String, usize>,
    by_semantic_key: HashMap<String, usize>,
    by_file_reference: HashMap<String, usize>,
}

impl Catalog {
    /// Build the catalog and its indices from entries.
    ///
    /// Entries with an empty file reference are dropped. Duplicate keys on
    /// any axis resolve to the later entry and are logged.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self::default();

        for entry in entries {
            let entry = entry.normalized();
            if entry.file_reference.is_empty() {
                log::warn!("Dropping catalog entry without a file reference: {entry:?}");
                continue;
            }

            let idx = catalog.entries.len();

            if let Some(identifier) = &entry.identifier {
                if let Some(prev) = catalog.by_identifier.insert(identifier.clone(), idx) {
                    log::warn!(
                        "Duplicate identifier {} ({} and {}), the later entry wins",
                        identifier,
                        catalog.entries[prev].file_reference,
                        entry.file_reference
                    );
                }
            }
            if let Some(key) = &entry.semantic_key {
                if let Some(prev) = catalog.by_semantic_key.insert(key.clone(), idx) {
                    log::warn!(
                        "Duplicate save key {} ({} and {}), the later entry wins",
                        key,
                        catalog.entries[prev].file_reference,
                        entry.file_reference
                    );
                }
            }
            if let Some(prev) = catalog.by_file_reference.insert(entry.file_reference.clone(), idx) {
                log::warn!(
                    "Duplicate file reference {} (entries {} and {}), the later entry wins",
                    entry.file_reference,
                    prev,
                    idx
                );
            }

            catalog.entries.push(entry);
        }

        catalog
    }

    /// All entries in discovery order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ========================================================================
    // Entry Access
    // ========================================================================

    pub fn entry_by_identifier(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.by_identifier.get(identifier).map(|&idx| &self.entries[idx])
    }

    pub fn entry_by_semantic_key(&self, semantic_key: &str) -> Option<&CatalogEntry> {
        self.by_semantic_key.get(semantic_key).map(|&idx| &self.entries[idx])
    }

    pub fn entry_by_file_reference(&self, file_reference: &str) -> Option<&CatalogEntry> {
        self.by_file_reference.get(file_reference).map(|&idx| &self.entries[idx])
    }

    /// Entries whose semantic key starts with `prefix` (e.g. `email_`), in
    /// discovery order.
    pub fn entries_with_key_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries.iter().filter(move |entry| {
            entry
                .semantic_key
                .as_deref()
                .is_some_and(|key| key.starts_with(prefix))
        })
    }

    // ========================================================================
    // Lookup Contract
    // ========================================================================

    /// identifier → display name
    pub fn resolve_name(&self, identifier: &str) -> &str {
        self.entry_by_identifier(identifier)
            .map_or(UNKNOWN, |entry| entry.display_name.as_str())
    }

    /// identifier → file reference
    pub fn resolve_file_reference(&self, identifier: &str) -> &str {
        self.entry_by_identifier(identifier)
            .map_or(UNKNOWN, |entry| entry.file_reference.as_str())
    }

    /// identifier → semantic key
    pub fn resolve_semantic_key(&self, identifier: &str) -> &str {
        self.entry_by_identifier(identifier)
            .and_then(|entry| entry.semantic_key.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// semantic key → display name
    pub fn resolve_name_by_semantic_key(&self, semantic_key: &str) -> &str {
        self.entry_by_semantic_key(semantic_key)
            .map_or(UNKNOWN, |entry| entry.display_name.as_str())
    }

    /// semantic key → file reference
    pub fn resolve_file_reference_by_semantic_key(&self, semantic_key: &str) -> &str {
        self.entry_by_semantic_key(semantic_key)
            .map_or(UNKNOWN, |entry| entry.file_reference.as_str())
    }

    /// file reference → display name
    pub fn resolve_name_by_file_reference(&self, file_reference: &str) -> &str {
        self.entry_by_file_reference(file_reference)
            .map_or(UNKNOWN, |entry| entry.display_name.as_str())
    }

    /// file reference → identifier
    pub fn resolve_identifier_by_file_reference(&self, file_reference: &str) -> &str {
        self.entry_by_file_reference(file_reference)
            .and_then(|entry| entry.identifier.as_deref())
            .unwrap_or(UNKNOWN)
    }
}
