//! Run configuration for preview generation.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_SOCIAL_FILE: &str = "social.org";
pub const DEFAULT_PREVIEW_DIR: &str = "preview";
pub const DEFAULT_TEMPLATE_DIR: &str = ".";
pub const DEFAULT_TEMPLATE_NAME: &str = "template.html";

/// Where to read the feed and template from, and where to write previews.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub social_file: PathBuf,
    pub preview_dir: PathBuf,
    pub template_dir: PathBuf,
    pub template_name: String,
    /// Public URL of the feed, used to build post permalinks.
    pub feed_url: Option<String>,
    /// Entity-escape user content before embedding it.
    pub escape_html: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            social_file: PathBuf::from(DEFAULT_SOCIAL_FILE),
            preview_dir: PathBuf::from(DEFAULT_PREVIEW_DIR),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            template_name: DEFAULT_TEMPLATE_NAME.to_string(),
            feed_url: None,
            escape_html: false,
        }
    }
}

impl Config {
    pub fn new(social_file: impl Into<PathBuf>, preview_dir: impl Into<PathBuf>) -> Self {
        Self {
            social_file: social_file.into(),
            preview_dir: preview_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_template(
        mut self,
        template_dir: impl Into<PathBuf>,
        template_name: impl Into<String>,
    ) -> Self {
        self.template_dir = template_dir.into();
        self.template_name = template_name.into();
        self
    }

    pub fn with_feed_url(mut self, feed_url: Option<String>) -> Self {
        self.feed_url = feed_url.filter(|url| !url.is_empty());
        self
    }

    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(&self.template_name)
    }

    /// Check that the feed and the template both exist.
    pub fn validate(&self) -> Result<()> {
        if !self.social_file.exists() {
            return Err(Error::MissingInput(self.social_file.clone()));
        }
        let template_path = self.template_path();
        if !template_path.exists() {
            return Err(Error::MissingTemplate(template_path));
        }
        Ok(())
    }

    pub fn social_file(&self) -> &Path {
        &self.social_file
    }

    pub fn preview_dir(&self) -> &Path {
        &self.preview_dir
    }
}
