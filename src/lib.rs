/// Assetlore - Game Asset Catalog & Wiki Extraction
///
/// Core library that resolves engine identifiers, save keys and file names
/// of a game-engine asset dump into one catalog, and formats wiki markup
/// from it.

pub mod catalog;
pub mod config;
pub mod core;
pub mod extract;
pub mod ingestion;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
