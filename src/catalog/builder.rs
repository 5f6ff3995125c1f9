//! Catalog Builder
//!
//! Builds a [`Catalog`] from an asset directory in two passes:
//!
//! 1. Every companion metadata file (`<name>.asset.meta`) contributes its
//!    identifier, creating an entry keyed by file reference.
//! 2. Every primary asset (`<name>.asset`) is tag-stripped and scanned for
//!    its save key, names and category, which are attached to the entry of
//!    the same file reference (or a new identifier-less entry).
//!
//! Display names are then resolved through the fixed fallback chain of
//! [`NameSources::resolve`]. A missing localization file is fatal; a bad
//! individual asset is logged and skipped.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use super::entry::{CatalogEntry, NameSource, NameSources, UNKNOWN_CATEGORY};
use super::error::{CatalogError, Result};
use super::Catalog;
use crate::config::CatalogConfig;
use crate::ingestion::{extract_identifier, strip_structural_tags, AssetDirectory, AssetFields, LocalizationTable};

// ============================================================================
// Options & Report
// ============================================================================

/// Builder settings.
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Primary asset extension, without the dot.
    pub asset_extension: String,
    /// Save-key prefixes marking player-visible items, whose names come from
    /// the localization table first.
    pub item_key_prefixes: Vec<String>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            asset_extension: "asset".to_string(),
            item_key_prefixes: vec!["item".to_string()],
        }
    }
}

impl From<&CatalogConfig> for BuilderOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            asset_extension: config.asset_extension.clone(),
            item_key_prefixes: config.item_key_prefixes.clone(),
        }
    }
}

/// Counters collected during one build, for the diagnostic log and the
/// console summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub meta_files: usize,
    pub asset_files: usize,
    /// Metadata files without a recognizable identifier.
    pub metas_without_identifier: usize,
    /// Metadata or asset files that could not be read.
    pub skipped_files: usize,
    /// Identifiers claimed by more than one entry.
    pub duplicate_identifiers: usize,
    /// How many display names each fallback source produced.
    pub name_sources: BTreeMap<NameSource, usize>,
}

impl BuildReport {
    pub fn names_from(&self, source: NameSource) -> usize {
        self.name_sources.get(&source).copied().unwrap_or(0)
    }
}

/// A built catalog plus its build report.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub catalog: Catalog,
    pub report: BuildReport,
}

// ============================================================================
// Builder
// ============================================================================

/// Entry under construction, keyed by file reference.
#[derive(Debug, Default)]
struct EntryDraft {
    identifier: Option<String>,
    fields: AssetFields,
}

/// Scans an asset directory into a [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    options: BuilderOptions,
}

impl CatalogBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Build a catalog from `input_dir`, resolving item names through the
    /// localization file at `localization_file`.
    pub fn build(&self, input_dir: impl AsRef<Path>, localization_file: impl AsRef<Path>) -> Result<BuildOutput> {
        let localization_file = localization_file.as_ref();
        let localization = LocalizationTable::load(localization_file)
            .map_err(|e| CatalogError::localization_unreadable(localization_file, e))?;

        self.build_with_localization(input_dir, &localization)
    }

    /// Build a catalog with an already-loaded localization table.
    pub fn build_with_localization(
        &self,
        input_dir: impl AsRef<Path>,
        localization: &LocalizationTable,
    ) -> Result<BuildOutput> {
        let input_dir = input_dir.as_ref();
        let _span = tracing::info_span!("build_catalog", input_dir = %input_dir.display()).entered();

        let directory = AssetDirectory::scan(input_dir, &self.options.asset_extension)
            .map_err(|e| CatalogError::input_dir_unreadable(input_dir, e))?;

        let mut report = BuildReport::default();
        let mut drafts: IndexMap<String, EntryDraft> = IndexMap::new();

        self.scan_metadata(&directory, &mut drafts, &mut report);
        self.scan_assets(&directory, &mut drafts, &mut report);

        let mut seen = HashSet::new();
        let entries: Vec<CatalogEntry> = drafts
            .into_iter()
            .map(|(file_reference, draft)| {
                if let Some(identifier) = &draft.identifier {
                    if !seen.insert(identifier.clone()) {
                        report.duplicate_identifiers += 1;
                    }
                }
                let (entry, source) = self.resolve_entry(file_reference, draft, localization);
                *report.name_sources.entry(source).or_default() += 1;
                entry
            })
            .collect();

        let catalog = Catalog::from_entries(entries);

        log::info!(
            "Built catalog from {}: {} entries ({} metadata files, {} assets, {} skipped, {} duplicate identifiers)",
            input_dir.display(),
            catalog.len(),
            report.meta_files,
            report.asset_files,
            report.skipped_files,
            report.duplicate_identifiers
        );

        Ok(BuildOutput { catalog, report })
    }

    /// Pass 1: identifier → file reference.
    fn scan_metadata(
        &self,
        directory: &AssetDirectory,
        drafts: &mut IndexMap<String, EntryDraft>,
        report: &mut BuildReport,
    ) {
        for (file_reference, meta_path) in directory.metas() {
            report.meta_files += 1;

            let text = match fs::read_to_string(meta_path) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("{}; skipping", CatalogError::asset_unreadable(meta_path, e));
                    report.skipped_files += 1;
                    continue;
                }
            };

            match extract_identifier(&text) {
                Some(identifier) => {
                    log::debug!("Mapped identifier {identifier} to file {file_reference}");
                    drafts.insert(
                        file_reference.to_string(),
                        EntryDraft {
                            identifier: Some(identifier),
                            fields: AssetFields::default(),
                        },
                    );
                }
                None => {
                    log::warn!("No identifier found in {}", meta_path.display());
                    report.metas_without_identifier += 1;
                }
            }
        }
    }

    /// Pass 2: attach save key, names and category by file reference.
    fn scan_assets(
        &self,
        directory: &AssetDirectory,
        drafts: &mut IndexMap<String, EntryDraft>,
        report: &mut BuildReport,
    ) {
        for (file_reference, asset_path) in directory.assets() {
            report.asset_files += 1;

            let raw = match fs::read_to_string(asset_path) {
                Ok(raw) => raw,
                Err(e) => {
                    // Pass 1 information for this file reference stays intact
                    log::warn!("{}; skipping", CatalogError::asset_unreadable(asset_path, e));
                    report.skipped_files += 1;
                    continue;
                }
            };

            let fields = AssetFields::scan(&strip_structural_tags(&raw));
            if fields.is_empty() {
                log::debug!("No catalog fields in {}", asset_path.display());
            }

            let draft = drafts.entry(file_reference.to_string()).or_insert_with(|| {
                log::debug!("Asset {file_reference} has no metadata companion, keyed by file reference only");
                EntryDraft::default()
            });
            draft.fields = fields;
        }
    }

    fn resolve_entry(
        &self,
        file_reference: String,
        draft: EntryDraft,
        localization: &LocalizationTable,
    ) -> (CatalogEntry, NameSource) {
        let EntryDraft { identifier, fields } = draft;

        let localized = fields
            .semantic_key
            .as_deref()
            .filter(|key| self.is_player_item(key))
            .and_then(|key| localization.name_for(key));

        let (display_name, source) = NameSources {
            localized,
            item_name: fields.item_name.as_deref(),
            object_name: fields.object_name.as_deref(),
            file_reference: &file_reference,
        }
        .resolve();

        log::debug!(
            "Resolved {} to '{}' via {}",
            file_reference,
            display_name,
            source.as_str()
        );

        let entry = CatalogEntry {
            identifier,
            file_reference,
            semantic_key: fields.semantic_key,
            display_name,
            category: fields.category.unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
        };

        (entry, source)
    }

    fn is_player_item(&self, semantic_key: &str) -> bool {
        self.options
            .item_key_prefixes
            .iter()
            .any(|prefix| semantic_key.starts_with(prefix.as_str()))
    }
}
