//! Scenario Unit Tests
//!
//! Multi-file scenarios run against temporary asset dumps:
//! - Catalog build: fallback chain, partial failures, idempotent rebuilds
//! - Extractors: shop price lists and email blocks end to end

mod extract_tests;
