//! Metadata module for org-social file format.
//!
//! This module contains the Metadata struct, which holds the feed-level
//! keywords (`#+TITLE:`, `#+NICK:`, `#+DESCRIPTION:`, `#+AVATAR:`) of a document.

/// Keywords recognised as feed metadata.
pub const TITLE_MARKER: &str = "#+TITLE:";
pub const NICK_MARKER: &str = "#+NICK:";
pub const DESCRIPTION_MARKER: &str = "#+DESCRIPTION:";
pub const AVATAR_MARKER: &str = "#+AVATAR:";

/// Feed-level metadata extracted from an org-social document.
///
/// Every field is optional. Fallback values ("User", "socia.org", ...) are only
/// applied when a preview is rendered, never here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    title: Option<String>,
    nick: Option<String>,
    description: Option<String>,
    avatar: Option<String>,
}

impl From<&str> for Metadata {
    /// Scan every line of the document for metadata keywords.
    ///
    /// Keywords may appear anywhere in the file and may be indented. When a
    /// keyword is repeated, the first occurrence wins.
    fn from(document: &str) -> Self {
        let mut metadata = Metadata::default();

        for line in document.lines() {
            let line = line.trim_start();
            if !line.starts_with("#+") {
                continue;
            }

            let slot = if let Some(value) = line.strip_prefix(TITLE_MARKER) {
                Some((&mut metadata.title, value))
            } else if let Some(value) = line.strip_prefix(NICK_MARKER) {
                Some((&mut metadata.nick, value))
            } else if let Some(value) = line.strip_prefix(DESCRIPTION_MARKER) {
                Some((&mut metadata.description, value))
            } else if let Some(value) = line.strip_prefix(AVATAR_MARKER) {
                Some((&mut metadata.avatar, value))
            } else {
                None
            };

            if let Some((field, value)) = slot {
                let value = value.trim();
                if field.is_none() && !value.is_empty() {
                    *field = Some(value.to_string());
                }
            }
        }

        metadata
    }
}

impl std::fmt::Display for Metadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = Vec::new();

        if let Some(title) = &self.title {
            output.push(format!("Title: {title}"));
        }
        if let Some(nick) = &self.nick {
            output.push(format!("Nick: {nick}"));
        }
        if let Some(description) = &self.description {
            output.push(format!("Description: {description}"));
        }
        if let Some(avatar) = &self.avatar {
            output.push(format!("Avatar: {avatar}"));
        }

        write!(f, "{}", output.join("\n"))
    }
}

impl Metadata {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.nick.is_none()
            && self.description.is_none()
            && self.avatar.is_none()
    }
}
