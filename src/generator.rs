//! Preview generation for a whole org-social file.
//!
//! Reads the feed, renders every valid post through the template and writes
//! one `<id>.html` file per post into the preview directory, replacing the
//! previous run's output.

use std::fs;
use std::path::Path;

use minijinja::{AutoEscape, Environment};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{og_description, ContentFormatter, OG_DESCRIPTION_MAX_LENGTH};
use crate::metadata::Metadata;
use crate::parser::parse_file;
use crate::post::Post;
use crate::preview::{safe_filename, PreviewContext};

/// Renders posts through a Jinja-style template.
pub struct PreviewGenerator {
    env: Environment<'static>,
    template_name: String,
    formatter: ContentFormatter,
    feed_url: Option<String>,
}

impl PreviewGenerator {
    /// Load `template_name` from `template_dir`.
    pub fn from_dir(template_dir: &Path, template_name: &str) -> Result<Self> {
        let mut env = base_environment();
        env.set_loader(minijinja::path_loader(template_dir));
        Self::with_environment(env, template_name)
    }

    /// Use an in-memory template.
    pub fn from_source(template_name: &str, source: impl Into<String>) -> Result<Self> {
        let mut env = base_environment();
        env.add_template_owned(template_name.to_string(), source.into())?;
        Self::with_environment(env, template_name)
    }

    fn with_environment(env: Environment<'static>, template_name: &str) -> Result<Self> {
        // Surface missing templates and syntax errors before any file is touched.
        env.get_template(template_name)?;
        Ok(Self {
            env,
            template_name: template_name.to_string(),
            formatter: ContentFormatter::new(),
            feed_url: None,
        })
    }

    pub fn with_formatter(mut self, formatter: ContentFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_feed_url(mut self, feed_url: Option<String>) -> Self {
        self.feed_url = feed_url;
        self
    }

    pub fn render(&self, post: &Post, metadata: &Metadata) -> Result<String> {
        let context =
            PreviewContext::new(post, metadata, self.feed_url.as_deref(), &self.formatter);
        self.render_context(&context)
    }

    pub fn render_context(&self, context: &PreviewContext) -> Result<String> {
        let template = self.env.get_template(&self.template_name)?;
        Ok(template.render(context)?)
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    // Content is already HTML; templates decide for themselves what to escape.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("og_description", |value: String, max_length: Option<usize>| {
        og_description(&value, max_length.unwrap_or(OG_DESCRIPTION_MAX_LENGTH))
    });
    env
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Stale previews removed before generating.
    pub deleted: usize,
    /// Valid posts found in the feed.
    pub parsed: usize,
    /// Previews written.
    pub generated: usize,
}

/// Generate a preview for every valid post of the configured feed.
///
/// Any I/O or template error aborts the run. Problems with the feed's content
/// never do: malformed parts are skipped or rendered with fallbacks.
pub fn generate_all(config: &Config) -> Result<GenerationReport> {
    config.validate()?;

    let generator = PreviewGenerator::from_dir(&config.template_dir, &config.template_name)?
        .with_formatter(ContentFormatter::new().with_escape_html(config.escape_html))
        .with_feed_url(config.feed_url.clone());

    let preview_dir = config.preview_dir();
    fs::create_dir_all(preview_dir).map_err(|e| Error::io(preview_dir, e))?;

    info!("Cleaning existing HTML files...");
    let deleted = clean_preview_dir(preview_dir)?;
    info!("Deleted {deleted} files");

    let social_file = config.social_file();
    let content = fs::read_to_string(social_file).map_err(|e| Error::io(social_file, e))?;
    let (metadata, posts) = parse_file(&content);
    info!("Processed {} posts", posts.len());
    debug!("Feed metadata:\n{metadata}");

    let mut generated = 0;
    for post in &posts {
        if post.id().contains(['/', '\\']) {
            warn!("Skipping post with a path separator in its ID: {}", post.id());
            continue;
        }

        let file_name = format!("{}.html", safe_filename(post.id()));
        let preview_path = preview_dir.join(&file_name);

        let html = generator.render(post, &metadata)?;
        fs::write(&preview_path, html).map_err(|e| Error::io(&preview_path, e))?;

        info!("Generated: {file_name}");
        generated += 1;
    }

    info!("Completed: {generated} files generated");

    Ok(GenerationReport {
        deleted,
        parsed: posts.len(),
        generated,
    })
}

/// Remove every `.html` file directly inside `dir`.
fn clean_preview_dir(dir: &Path) -> Result<usize> {
    let mut deleted = 0;

    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
            deleted += 1;
        }
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = include_str!("../templates/preview.html");

    const FEED: &str = "#+TITLE: Bob's journal
#+NICK: bob
#+AVATAR: https://bob.org/avatar.png

* Posts
**
:PROPERTIES:
:ID: 2025-05-01T12:00:00+01:00
:TAGS: rust
:END:

Hello [[org-social:https://alice.org/social.org][alice]], see [[https://example.com][this]].

**
:PROPERTIES:
:LANG: en
:END:

Dropped, no ID.

**
:PROPERTIES:
:ID: 2025-05-02T08:00:00Z
:MOOD: 🎉
:END:
";

    fn setup(feed: &str) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("social.org"), feed).unwrap();
        fs::write(dir.path().join("template.html"), TEMPLATE).unwrap();

        let config = Config::new(dir.path().join("social.org"), dir.path().join("preview"))
            .with_template(dir.path(), "template.html");
        (dir, config)
    }

    #[test]
    fn test_generate_all_writes_one_file_per_valid_post() {
        let (dir, config) = setup(FEED);
        let report = generate_all(&config).unwrap();

        assert_eq!(report, GenerationReport { deleted: 0, parsed: 2, generated: 2 });

        let preview_dir = dir.path().join("preview");
        let first =
            fs::read_to_string(preview_dir.join("2025-05-01T12-00-00plus01-00.html")).unwrap();
        assert!(first.contains(r##"<a href="#" style="color: #1d9bf0;">@alice</a>"##));
        assert!(first.contains(
            r#"<a href="https://example.com" style="color: #1d9bf0;" target="_blank">this</a>"#
        ));
        assert!(first.contains(concat!(
            r#"<meta property="og:description" content="Hello [[org-social:https://alice.org/social.org][alice]], "#,
            r#"see [[https://example.com][this]].">"#,
        )));
        assert!(first.contains("#rust"));
        assert!(first.contains(r#"<html lang="es">"#));

        let second = fs::read_to_string(preview_dir.join("2025-05-02T08-00-00Z.html")).unwrap();
        assert!(second.contains(r#"<span style="font-size: 20px;">🎉</span>"#));
    }

    #[test]
    fn test_generate_all_replaces_stale_previews() {
        let (dir, config) = setup(FEED);
        let preview_dir = dir.path().join("preview");
        fs::create_dir_all(&preview_dir).unwrap();
        fs::write(preview_dir.join("old.html"), "stale").unwrap();
        fs::write(preview_dir.join("keep.txt"), "not a preview").unwrap();

        let report = generate_all(&config).unwrap();

        assert_eq!(report.deleted, 1);
        assert!(!preview_dir.join("old.html").exists());
        assert!(preview_dir.join("keep.txt").exists());
    }

    #[test]
    fn test_feed_without_posts_section() {
        let (dir, config) = setup("#+NICK: bob\n");
        let report = generate_all(&config).unwrap();

        assert_eq!(report.generated, 0);
        assert!(dir.path().join("preview").is_dir());
    }

    #[test]
    fn test_feed_url_builds_permalinks() {
        let (dir, config) = setup(FEED);
        let config = config.with_feed_url(Some("https://bob.org/social.org".to_string()));
        generate_all(&config).unwrap();

        let html =
            fs::read_to_string(dir.path().join("preview/2025-05-02T08-00-00Z.html")).unwrap();
        assert!(html.contains(
            r#"<a href="https://bob.org/social.org#2025-05-02T08:00:00Z">View post</a>"#
        ));
    }

    #[test]
    fn test_escape_html_option() {
        let feed = "* Posts\n**\n:PROPERTIES:\n:ID: 1\n:END:\n<script>alert(1)</script>\n";
        let (dir, config) = setup(feed);
        generate_all(&config.with_escape_html(true)).unwrap();

        let html = fs::read_to_string(dir.path().join("preview/1.html")).unwrap();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;&#x2f;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_ids_with_path_separators_are_skipped() {
        let feed = concat!(
            "* Posts\n",
            "**\n:PROPERTIES:\n:ID: ../../evil\n:END:\nnope\n",
            "**\n:PROPERTIES:\n:ID: a\\b\n:END:\nnope\n",
            "**\n:PROPERTIES:\n:ID: 1\n:END:\nfine\n",
        );
        let (dir, config) = setup(feed);
        let report = generate_all(&config).unwrap();

        assert_eq!(report.parsed, 3);
        assert_eq!(report.generated, 1);
        assert!(dir.path().join("preview/1.html").exists());
        assert!(!dir.path().join("evil.html").exists());
        assert!(!dir.path().parent().unwrap().join("evil.html").exists());
        assert_eq!(fs::read_dir(dir.path().join("preview")).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_inputs_abort() {
        let (dir, config) = setup(FEED);
        fs::remove_file(dir.path().join("template.html")).unwrap();
        assert!(matches!(generate_all(&config), Err(Error::MissingTemplate(_))));

        let config = Config::new(dir.path().join("nope.org"), dir.path().join("preview"));
        assert!(matches!(generate_all(&config), Err(Error::MissingInput(_))));
    }

    #[test]
    fn test_invalid_template_is_an_error() {
        assert!(matches!(
            PreviewGenerator::from_source("broken.html", "{% if %}"),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn test_render_does_not_autoescape() {
        let generator = PreviewGenerator::from_source(
            "p.html",
            "{{ formatted_content }}|{{ content | og_description(8) }}",
        )
        .unwrap();
        let post = Post::from(":PROPERTIES:\n:ID: 1\n:END:\n[[https://x.com]] is a very long line");

        let html = generator.render(&post, &Metadata::default()).unwrap();
        assert_eq!(
            html,
            r#"<a href="https://x.com" style="color: #1d9bf0;" target="_blank">https://x.com</a> is a very long line|[[https:..."#
        );
    }
}
