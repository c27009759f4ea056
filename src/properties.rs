//! Property drawer decoding for org-social posts.
//!
//! A post may carry a `:PROPERTIES:` ... `:END:` drawer holding `:KEY:value`
//! entries. This module locates the drawer inside a raw post block and decodes
//! its entries.

use std::collections::BTreeMap;

pub const PROPERTIES_MARKER: &str = ":PROPERTIES:";
pub const END_MARKER: &str = ":END:";

/// Decoded property drawer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyDrawer {
    /// Entries keyed by name, exactly as written (case-sensitive).
    pub properties: BTreeMap<String, String>,
    /// Byte offset in the block just past the `:END:` line.
    pub end: usize,
}

/// Locate and decode the property drawer of a block.
///
/// Returns `None` when the block has no `:PROPERTIES:` line, or when the drawer
/// is never closed by an `:END:` line.
pub fn decode(block: &str) -> Option<PropertyDrawer> {
    let mut offset = 0;
    let mut in_drawer = false;
    let mut properties = BTreeMap::new();

    for line in block.split_inclusive('\n') {
        let line_end = offset + line.len();

        if !in_drawer {
            in_drawer = opens_drawer(line);
        } else if line.trim_start().starts_with(END_MARKER) {
            return Some(PropertyDrawer {
                properties,
                end: line_end,
            });
        } else if let Some((key, value)) = parse_property_line(line) {
            // Later entries overwrite earlier ones.
            properties.insert(key.to_string(), value.to_string());
        }

        offset = line_end;
    }

    None
}

/// A line opens the drawer if `:PROPERTIES:` is followed only by whitespace.
/// Text before the marker on the same line is allowed.
fn opens_drawer(line: &str) -> bool {
    match line.find(PROPERTIES_MARKER) {
        Some(pos) => line[pos + PROPERTIES_MARKER.len()..].trim().is_empty(),
        None => false,
    }
}

/// Parse a single `:KEY:value` line.
///
/// The key runs from the leading colon to the next colon and must not be empty.
/// Everything after that second colon, trimmed, is the value. Any other line
/// yields `None`.
pub fn parse_property_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix(':')?;
    let (key, value) = rest.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
