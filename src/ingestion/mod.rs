//! Asset Ingestion
//!
//! Reading raw engine asset dumps: structural-tag preprocessing, light
//! pattern extraction of known fields, localization tables, directory
//! scanning and (for extractors) structured YAML access.

pub mod document;
pub mod fields;
pub mod localization;
pub mod preprocess;
pub mod scan;

pub use document::AssetDocument;
pub use fields::{extract_identifier, AssetFields};
pub use localization::{LocalizationRecord, LocalizationTable};
pub use preprocess::strip_structural_tags;
pub use scan::AssetDirectory;
