//! Post module for org-social file format.
//!
//! This module contains the Post struct, built from one raw post block:
//! the entries of its property drawer plus the free-text body that follows.

use std::collections::BTreeMap;

use crate::properties;

/// Represents a post parsed from an org-social file.
///
/// Properties are kept as written, so unknown keys survive alongside the
/// well-known ones (`ID`, `LANG`, `TAGS`, `CLIENT`, `REPLY_TO`, `MOOD`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Post {
    properties: BTreeMap<String, String>,
    content: String,
}

impl From<&str> for Post {
    /// Build a post from a raw block.
    ///
    /// Everything after the `:END:` line of the property drawer, trimmed, is the
    /// content. A block without a drawer is all content and has no properties.
    /// This never fails; a post without an `ID` is simply not valid.
    fn from(block: &str) -> Self {
        match properties::decode(block) {
            Some(drawer) => Post {
                properties: drawer.properties,
                content: block[drawer.end..].trim().to_string(),
            },
            None => Post {
                properties: BTreeMap::new(),
                content: block.trim().to_string(),
            },
        }
    }
}

impl Post {
    /// A post is valid when it carries a non-empty `ID`.
    pub fn is_valid(&self) -> bool {
        !self.id().is_empty()
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// The post identifier, which doubles as its timestamp.
    pub fn id(&self) -> &str {
        self.property("ID").unwrap_or_default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mood(&self) -> Option<&str> {
        self.property("MOOD")
    }

    pub fn lang(&self) -> Option<&str> {
        self.property("LANG")
    }

    /// Raw tag string as written in the drawer.
    pub fn tags(&self) -> Option<&str> {
        self.property("TAGS")
    }

    pub fn tag_list(&self) -> Vec<String> {
        self.tags()
            .map(|tags| tags.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn reply_to(&self) -> Option<&str> {
        self.property("REPLY_TO")
    }

    pub fn client(&self) -> Option<&str> {
        self.property("CLIENT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_block_with_drawer() {
        let block = concat!(
            ":PROPERTIES:\n:ID: 2025-05-01T12:00:00+0100\n:TAGS: test multiline\n:MOOD::)\n:END:\n",
            "\nFirst line of content\nSecond line\n",
        );
        let post = Post::from(block);

        assert_eq!(post.id(), "2025-05-01T12:00:00+0100");
        assert_eq!(post.tags(), Some("test multiline"));
        assert_eq!(post.tag_list(), vec!["test".to_string(), "multiline".to_string()]);
        assert_eq!(post.mood(), Some(":)"));
        assert_eq!(post.content(), "First line of content\nSecond line");
        assert!(post.is_valid());
    }

    #[test]
    fn test_from_block_without_drawer() {
        let post = Post::from("  Only text here\n:ID: not a property\n");

        assert!(post.properties().is_empty());
        assert_eq!(post.content(), "Only text here\n:ID: not a property");
        assert!(!post.is_valid());
    }

    #[test]
    fn test_drawer_without_content() {
        let post = Post::from(":PROPERTIES:\n:ID: abc123\n:MOOD: :)\n:END:");

        assert_eq!(post.id(), "abc123");
        assert_eq!(post.content(), "");
    }

    #[test]
    fn test_missing_or_empty_id_is_invalid() {
        assert!(!Post::from(":PROPERTIES:\n:LANG: en\n:END:\nhi").is_valid());
        assert!(!Post::from(":PROPERTIES:\n:ID:\n:END:\nhi").is_valid());
    }

    #[test]
    fn test_unknown_properties_are_kept() {
        let post = Post::from(":PROPERTIES:\n:ID: 1\n:POLL_END: 2025-01-01\n:END:\n");
        assert_eq!(post.property("POLL_END"), Some("2025-01-01"));
        assert_eq!(post.lang(), None);
    }
}
