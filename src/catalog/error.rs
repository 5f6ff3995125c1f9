//! Catalog Error Types
//!
//! Fatal variants abort a build or load; `AssetUnreadable` is the only
//! per-record variant and is logged by the builder instead of propagated.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    // =========================================================================
    // Build Errors
    // =========================================================================

    /// The localization file is missing or unreadable.
    #[error("Cannot read localization file {path}: {source}")]
    LocalizationUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The asset input directory is missing or not a directory.
    #[error("Cannot scan asset directory {path}: {source}")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single asset or metadata file could not be read.
    #[error("Cannot read asset {path}: {source}")]
    AssetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Persistence Errors
    // =========================================================================

    #[error("Cannot read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write catalog {path}: {source}")]
    CatalogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a JSON array of entry records.
    #[error("Malformed catalog {path}: {source}")]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn localization_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalizationUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn input_dir_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputDirUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn asset_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::AssetUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn catalog_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CatalogRead {
            path: path.into(),
            source,
        }
    }

    pub fn catalog_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CatalogWrite {
            path: path.into(),
            source,
        }
    }

    pub fn catalog_format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CatalogFormat {
            path: path.into(),
            source,
        }
    }

    /// Check if this error only affects a single record (log and continue).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AssetUnreadable { .. })
    }
}
