//! Extractor Error Types
//!
//! Fatal variants stop an extractor before it writes anything. The
//! recoverable ones concern a single record: the extractor logs them, counts
//! the record as skipped and moves on.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    // =========================================================================
    // Fatal
    // =========================================================================

    /// A localization table the extractor depends on is unreadable.
    #[error("Cannot read localization file {path}: {source}")]
    LocalizationUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot scan asset directory {path}: {source}")]
    InputDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write output {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Per-record
    // =========================================================================

    #[error("Cannot read asset {path}: {source}")]
    AssetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse asset {path}: {source}")]
    AssetParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Asset {file_reference} has no '{field}' field")]
    MissingField {
        file_reference: String,
        field: &'static str,
    },

    /// A referenced identifier has no catalog entry or no asset file.
    #[error("Unresolved reference {identifier} in {context}")]
    UnresolvedReference { identifier: String, context: String },
}

impl ExtractError {
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

    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
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

    pub fn asset_parse(path: impl Into<PathBuf>, source: serde_yaml_ng::Error) -> Self {
        Self::AssetParse {
            path: path.into(),
            source,
        }
    }

    pub fn missing_field(file_reference: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            file_reference: file_reference.into(),
            field,
        }
    }

    pub fn unresolved_reference(identifier: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            identifier: identifier.into(),
            context: context.into(),
        }
    }

    /// Check if this error only affects a single record (log and continue).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AssetUnreadable { .. }
                | Self::AssetParse { .. }
                | Self::MissingField { .. }
                | Self::UnresolvedReference { .. }
        )
    }
}
