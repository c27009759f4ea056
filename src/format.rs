//! HTML formatting of post content.
//!
//! Turns the org markup of a post body into the HTML fragment embedded in a
//! preview, and provides the plain-text `og_description` filter used for
//! link-preview meta tags.

use minijinja::HtmlEscape;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::tokenizer::{Token, Tokenizer};

pub const LINK_COLOR: &str = "#1d9bf0";
pub const NO_CONTENT: &str = "No content";

/// Renders post content to an HTML fragment.
///
/// By default user text is embedded as written. With `escape_html` set, text,
/// labels, URLs and mood are entity-escaped first.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentFormatter {
    escape_html: bool,
}

impl ContentFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    /// Format a post body, optionally decorated with its mood.
    ///
    /// An empty body with a mood renders as the mood alone, in a larger font.
    /// A non-empty body gets the mood appended after it. An empty result falls
    /// back to [`NO_CONTENT`].
    pub fn format(&self, content: &str, mood: Option<&str>) -> String {
        let mood = mood.filter(|mood| !mood.is_empty());
        let has_content = !content.trim().is_empty();

        if let (false, Some(mood)) = (has_content, mood) {
            return format!(r#"<span style="font-size: 20px;">{}</span>"#, self.text(mood));
        }

        let tokens = Tokenizer::new(content.to_string()).tokenize();
        let mut formatted = String::with_capacity(content.len());
        for token in &tokens {
            self.render_token(token, &mut formatted);
        }

        if let (true, Some(mood)) = (has_content, mood) {
            let mood = self.text(mood);
            formatted.push_str(&format!(r#" <span style="font-size: 16px;">{mood}</span>"#));
        }

        if formatted.is_empty() {
            NO_CONTENT.to_string()
        } else {
            formatted
        }
    }

    fn render_token(&self, token: &Token, out: &mut String) {
        match token {
            Token::PlainText(text) => out.push_str(&self.text(text)),
            Token::Mention { label, .. } => {
                // Mention targets are not resolved; the anchor is inert.
                out.push_str(&format!(
                    r##"<a href="#" style="color: {LINK_COLOR};">@{}</a>"##,
                    self.label(label)
                ));
            }
            Token::Link { url, description } => {
                let label = description.as_deref().unwrap_or(url);
                out.push_str(&format!(
                    r#"<a href="{}" style="color: {LINK_COLOR};" target="_blank">{}</a>"#,
                    self.label(url),
                    self.label(label)
                ));
            }
            Token::LineBreak => out.push_str("<br>"),
        }
    }

    fn text(&self, text: &str) -> String {
        if self.escape_html {
            escape_html(text)
        } else {
            text.to_string()
        }
    }

    /// Link text or target. Newlines become breaks like anywhere else.
    fn label(&self, label: &str) -> String {
        self.text(label).replace('\n', "<br>")
    }
}

/// Format content with the default (non-escaping) formatter.
pub fn format_content(content: &str, mood: Option<&str>) -> String {
    ContentFormatter::new().format(content, mood)
}

pub fn escape_html(text: &str) -> String {
    HtmlEscape(text).to_string()
}

pub const OG_DESCRIPTION_MAX_LENGTH: usize = 120;

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static SPACES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());

/// Flatten content into a single line of plain text for `og:description`.
///
/// Whitespace runs collapse to one space, `<...>` tags are removed, and text
/// longer than `max_length` characters is cut and suffixed with `...`.
pub fn og_description(value: &str, max_length: usize) -> String {
    let text = WHITESPACE_REGEX.replace_all(value, " ");
    let text = TAG_REGEX.replace_all(&text, "");
    let mut text = SPACES_REGEX.replace_all(&text, " ").into_owned();

    if text.chars().count() > max_length {
        let truncated: String = text.chars().take(max_length).collect();
        text = format!("{}...", truncated.trim_end());
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_with_mood() {
        assert_eq!(
            format_content("hello", Some(":)")),
            r#"hello <span style="font-size: 16px;">:)</span>"#
        );
    }

    #[test]
    fn test_mood_only() {
        assert_eq!(
            format_content("", Some(":)")),
            r#"<span style="font-size: 20px;">:)</span>"#
        );
        assert_eq!(
            format_content("  \n ", Some("🎉")),
            r#"<span style="font-size: 20px;">🎉</span>"#
        );
    }

    #[test]
    fn test_no_content_fallback() {
        assert_eq!(format_content("", None), NO_CONTENT);
        assert_eq!(format_content("", Some("")), NO_CONTENT);
    }

    #[test]
    fn test_mention() {
        assert_eq!(
            format_content("[[org-social:alice][Alice]]", None),
            r##"<a href="#" style="color: #1d9bf0;">@Alice</a>"##
        );
    }

    #[test]
    fn test_described_link() {
        assert_eq!(
            format_content("[[https://x.com][X]]", None),
            r#"<a href="https://x.com" style="color: #1d9bf0;" target="_blank">X</a>"#
        );
    }

    #[test]
    fn test_plain_link_uses_url_as_text() {
        assert_eq!(
            format_content("[[https://x.com]]", None),
            r#"<a href="https://x.com" style="color: #1d9bf0;" target="_blank">https://x.com</a>"#
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(format_content("one\ntwo\n\nthree", None), "one<br>two<br><br>three");
    }

    #[test]
    fn test_line_break_inside_link() {
        assert_eq!(
            format_content("[[a\nb]]", None),
            r#"<a href="a<br>b" style="color: #1d9bf0;" target="_blank">a<br>b</a>"#
        );
    }

    #[test]
    fn test_generated_markup_is_not_rematched() {
        let formatted = format_content("[[https://a.com][[[b]]]]", None);
        assert_eq!(formatted.matches("<a ").count(), 1);
    }

    #[test]
    fn test_mixed_content() {
        let formatted = format_content(
            "Hi [[org-social:https://bob.org/social.org][bob]],\nsee [[https://example.com][this]] and [[https://rust-lang.org]]",
            Some("🦀"),
        );
        assert_eq!(
            formatted,
            concat!(
                r##"Hi <a href="#" style="color: #1d9bf0;">@bob</a>,<br>"##,
                r#"see <a href="https://example.com" style="color: #1d9bf0;" target="_blank">this</a> and "#,
                r#"<a href="https://rust-lang.org" style="color: #1d9bf0;" target="_blank">https://rust-lang.org</a>"#,
                r#" <span style="font-size: 16px;">🦀</span>"#,
            )
        );
    }

    #[test]
    fn test_html_is_kept_by_default() {
        assert_eq!(format_content("<b>bold</b>", None), "<b>bold</b>");
    }

    #[test]
    fn test_escape_html() {
        let formatter = ContentFormatter::new().with_escape_html(true);
        assert_eq!(
            formatter.format("<script>x</script> & [[https://a.com?q=\"1\"][<i>]]", Some("<3")),
            concat!(
                "&lt;script&gt;x&lt;&#x2f;script&gt; &amp; ",
                r#"<a href="https:&#x2f;&#x2f;a.com?q=&quot;1&quot;" style="color: #1d9bf0;" target="_blank">"#,
                "&lt;i&gt;</a>",
                r#" <span style="font-size: 16px;">&lt;3</span>"#,
            )
        );
    }

    #[test]
    fn test_og_description_flattens_and_strips() {
        assert_eq!(
            og_description("Hello\r\nworld\t with  <a href=\"x\">a link</a>", 120),
            "Hello world with a link"
        );
        assert_eq!(og_description("a <> b", 120), "a <> b");
        assert_eq!(og_description("  <p>  spaced  </p>  ", 120), "spaced");
    }

    #[test]
    fn test_og_description_truncates() {
        let text = "word ".repeat(40);
        let description = og_description(&text, 12);
        assert_eq!(description, "word word wo...");

        assert_eq!(og_description("short", 12), "short");
    }
}
