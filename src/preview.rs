//! Template context for a single post preview.
//!
//! A preview template receives one flat context per post, mixing the post's own
//! properties with the feed metadata. Fallbacks for missing values are applied
//! here, not during parsing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::ContentFormatter;
use crate::metadata::Metadata;
use crate::post::Post;
use crate::time;

pub const DEFAULT_LANG: &str = "es";
pub const DEFAULT_NICK: &str = "User";
pub const DEFAULT_TITLE: &str = "socia.org";

/// Values exposed to the preview template.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PreviewContext {
    pub post_id: String,
    pub content: String,
    pub formatted_content: String,
    pub mood: String,
    pub language: String,
    pub tags: Vec<String>,
    pub tags_string: String,
    pub reply_to: String,
    pub client: String,
    pub is_reply: bool,
    pub has_mood: bool,
    pub has_tags: bool,
    pub has_content: bool,
    pub nick: String,
    pub title: String,
    pub description: String,
    pub avatar_url: String,
    pub has_avatar: bool,
    pub user_initial: String,
    pub formatted_time: String,
    pub timestamp: String,
    pub post_url: String,
}

impl PreviewContext {
    pub fn new(
        post: &Post,
        metadata: &Metadata,
        feed_url: Option<&str>,
        formatter: &ContentFormatter,
    ) -> Self {
        Self::at(post, metadata, feed_url, formatter, Utc::now())
    }

    /// Build the context with relative times computed against `now`.
    pub fn at(
        post: &Post,
        metadata: &Metadata,
        feed_url: Option<&str>,
        formatter: &ContentFormatter,
        now: DateTime<Utc>,
    ) -> Self {
        let post_id = post.id().to_string();
        let content = post.content().to_string();
        let mood = post.mood().unwrap_or_default().to_string();
        let tags_string = post.tags().unwrap_or_default().to_string();
        let reply_to = post.reply_to().unwrap_or_default().to_string();

        let nick = metadata.nick().unwrap_or(DEFAULT_NICK).to_string();
        let avatar_url = metadata.avatar().unwrap_or_default().to_string();

        let post_url = match feed_url {
            Some(feed_url) if !feed_url.is_empty() && !post_id.is_empty() => {
                format!("{feed_url}#{post_id}")
            }
            _ => String::new(),
        };

        Self {
            formatted_content: formatter.format(&content, post.mood()),
            formatted_time: time::format_relative_time_at(&post_id, now),
            language: post.lang().unwrap_or(DEFAULT_LANG).to_string(),
            tags: post.tag_list(),
            client: post.client().unwrap_or_default().to_string(),
            is_reply: !reply_to.is_empty(),
            has_mood: !mood.is_empty(),
            has_tags: !tags_string.is_empty(),
            has_content: !content.trim().is_empty(),
            title: metadata.title().unwrap_or(DEFAULT_TITLE).to_string(),
            description: metadata.description().unwrap_or_default().to_string(),
            has_avatar: !avatar_url.is_empty(),
            user_initial: user_initial(&nick),
            timestamp: post_id.clone(),
            post_id,
            content,
            mood,
            tags_string,
            reply_to,
            nick,
            avatar_url,
            post_url,
        }
    }
}

/// Uppercased first character of the nick, `U` for an empty nick.
fn user_initial(nick: &str) -> String {
    match nick.chars().next() {
        Some(first) => first.to_uppercase().collect(),
        None => "U".to_string(),
    }
}

/// File name stem for a post's preview.
///
/// Post IDs are timestamps, so `:` becomes `-` and `+` becomes `plus`.
pub fn safe_filename(post_id: &str) -> String {
    post_id.replace(':', "-").replace('+', "plus")
}
