//! Location names for visited values.
//!
//! A location is a plain string grown by appending to the parent's name:
//!
//! | Value | Name |
//! |-------|------|
//! | record field | `parent.field` |
//! | map entry | `parent[key]` |
//! | sequence element | `parent[index/len]`, `index` counted from 1 |
//!
//! These strings end up in error messages and in the returned file map, so
//! callers may match on them character for character.

use std::fmt::Display;

pub fn field(parent: &str, name: &str) -> String {
    format!("{parent}.{name}")
}

/// Map keys are rendered with their `Display` impl.
pub fn entry(parent: &str, key: &dyn Display) -> String {
    format!("{parent}[{key}]")
}

/// `index` is zero-based; the rendered position is one-based and paired
/// with the sequence length.
pub fn element(parent: &str, index: usize, len: usize) -> String {
    format!("{parent}[{}/{len}]", index + 1)
}
