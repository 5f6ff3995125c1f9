//! Catalog Persistence
//!
//! The persisted catalog is a pretty-printed JSON array of entry records.
//! Loading rebuilds every index, so a loaded catalog answers lookups exactly
//! like the one that was saved.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::error::{CatalogError, Result};
use super::{Catalog, CatalogEntry};

impl Catalog {
    /// Write the catalog to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CatalogError::catalog_write(parent, e))?;
        }

        let file = File::create(path).map_err(|e| CatalogError::catalog_write(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer
            .flush()
            .map_err(|e| CatalogError::catalog_write(path, e))?;

        log::info!("Wrote {} catalog entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a catalog previously written by [`Catalog::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| CatalogError::catalog_read(path, e))?;
        let entries: Vec<CatalogEntry> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CatalogError::catalog_format(path, e))?;

        let catalog = Self::from_entries(entries);
        log::info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }
}
