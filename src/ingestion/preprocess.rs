//! Structural Tag Preprocessing
//!
//! Serialized engine assets annotate every document with a positional tag of
//! the form `!u!<typeId> &<instanceId>` (e.g. `--- !u!114 &11400000`). The
//! tags are not part of the semantic content and are not valid YAML, so they
//! are stripped before any structured or pattern-based parse.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern for engine structural tags: `!u!114 &11400000`
static STRUCTURAL_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!u!\d+ &\d+").expect("Failed to compile structural tag regex")
});

/// Remove every structural tag from `content`.
///
/// Pure text substitution; borrows the input unchanged when no tag is present.
pub fn strip_structural_tags(content: &str) -> Cow<'_, str> {
    STRUCTURAL_TAG.replace_all(content, "")
}
