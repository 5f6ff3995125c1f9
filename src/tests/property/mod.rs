//! Property-based tests for the identifier catalog
//!
//! ## Test Modules
//!
//! - `lookup_props`: Tests for the lookup contract
//!   - Every lookup is total; unknown keys yield the sentinel
//!   - Known keys resolve to the value they were built with
//!   - A JSON round trip answers every lookup identically
//!   - The display-name fallback chain picks the first usable source
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod lookup_props;
