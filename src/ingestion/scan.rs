//! Asset Directory Scanning
//!
//! Walks an asset dump once and indexes primary assets (`<name>.asset`) and
//! their companion metadata files (`<name>.asset.meta`) by file reference,
//! the base file name without extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use walkdir::WalkDir;

/// Index of one asset directory tree.
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
    extension: String,
    assets: IndexMap<String, PathBuf>,
    metas: IndexMap<String, PathBuf>,
}

impl AssetDirectory {
    /// Scan `root` recursively for `*.{extension}` and `*.{extension}.meta` files.
    ///
    /// Entries are visited in file-name order so repeated scans of an
    /// unchanged tree produce identical indices. Unreadable sub-entries are
    /// logged and skipped; only an unusable `root` is an error.
    pub fn scan(root: impl AsRef<Path>, extension: &str) -> io::Result<Self> {
        let root = root.as_ref();

        let meta = fs::metadata(root)?;
        if !meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            ));
        }

        let asset_suffix = format!(".{extension}");
        let meta_suffix = format!(".{extension}.meta");

        let mut directory = Self {
            root: root.to_path_buf(),
            extension: extension.to_string(),
            assets: IndexMap::new(),
            metas: IndexMap::new(),
        };

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable directory entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                log::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
                continue;
            };

            let (index, file_reference) = if let Some(base) = file_name.strip_suffix(&meta_suffix) {
                (&mut directory.metas, base)
            } else if let Some(base) = file_name.strip_suffix(&asset_suffix) {
                (&mut directory.assets, base)
            } else {
                continue;
            };

            if file_reference.is_empty() {
                log::warn!("Skipping asset with empty base name: {}", entry.path().display());
                continue;
            }

            if let Some(previous) = index.insert(file_reference.to_string(), entry.path().to_path_buf()) {
                log::warn!(
                    "File reference '{}' appears more than once ({} and {}), keeping the later file",
                    file_reference,
                    previous.display(),
                    entry.path().display()
                );
            }
        }

        log::debug!(
            "Scanned {}: {} assets, {} metadata files",
            root.display(),
            directory.assets.len(),
            directory.metas.len()
        );

        Ok(directory)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Primary assets as `(file_reference, path)` in scan order.
    pub fn assets(&self) -> impl Iterator<Item = (&str, &Path)> + '_ {
        self.assets.iter().map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Companion metadata files as `(file_reference, path)` in scan order.
    pub fn metas(&self) -> impl Iterator<Item = (&str, &Path)> + '_ {
        self.metas.iter().map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Path of the primary asset for a file reference.
    pub fn asset_path(&self, file_reference: &str) -> Option<&Path> {
        self.assets.get(file_reference).map(PathBuf::as_path)
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn meta_count(&self) -> usize {
        self.metas.len()
    }
}
