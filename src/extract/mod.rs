//! Wiki Extractors
//!
//! Extractors read the persisted catalog plus the raw asset tree and write
//! wiki-formatted text files. Each one resolves references through the
//! catalog, never through its own tables, and treats a bad record as a
//! logged skip rather than a failed run.

mod error;
pub mod email;
pub mod shop;
pub mod wiki;

pub use email::EmailExtractor;
pub use error::{ExtractError, Result};
pub use shop::ShopExtractor;

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::ingestion::{AssetDirectory, AssetDocument};

/// A catalog consumer producing wiki output.
pub trait Extractor {
    /// Short name, used for the diagnostic log file and the summary.
    fn name(&self) -> &'static str;

    /// Run against a loaded catalog.
    fn run(&self, catalog: &Catalog) -> Result<ExtractReport>;
}

/// What an extractor run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub outputs: Vec<PathBuf>,
    /// Records written to an output file.
    pub written: usize,
    /// Records or lines dropped because of a recoverable error.
    pub skipped: usize,
}

impl ExtractReport {
    /// Log a recoverable error and count the skip; hand fatal errors back.
    pub(crate) fn skip_or_fail(&mut self, err: ExtractError) -> Result<()> {
        if err.is_recoverable() {
            log::warn!("{err}; skipping");
            self.skipped += 1;
            Ok(())
        } else {
            Err(err)
        }
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

pub(crate) fn scan_assets(input_dir: &Path, extension: &str) -> Result<AssetDirectory> {
    AssetDirectory::scan(input_dir, extension)
        .map_err(|e| ExtractError::input_dir_unreadable(input_dir, e))
}

pub(crate) fn read_asset(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ExtractError::asset_unreadable(path, e))
}

pub(crate) fn read_document(path: &Path) -> Result<AssetDocument> {
    let raw = read_asset(path)?;
    AssetDocument::parse(&raw).map_err(|e| ExtractError::asset_parse(path, e))
}

/// Locate the asset file behind a referenced identifier.
pub(crate) fn resolve_asset_path<'a>(
    catalog: &'a Catalog,
    directory: &'a AssetDirectory,
    identifier: &str,
    context: &str,
) -> Result<(&'a str, &'a Path)> {
    let file_reference = catalog
        .entry_by_identifier(identifier)
        .map(|entry| entry.file_reference.as_str())
        .ok_or_else(|| ExtractError::unresolved_reference(identifier, context))?;

    let path = directory.asset_path(file_reference).ok_or_else(|| {
        ExtractError::unresolved_reference(
            identifier,
            format!("{context} ({file_reference} has no asset file)"),
        )
    })?;

    Ok((file_reference, path))
}

pub(crate) fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExtractError::output_write(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| ExtractError::output_write(path, e))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
