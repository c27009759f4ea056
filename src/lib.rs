//! # org-social-preview
//!
//! Generates static HTML link previews for the posts of an [Org-social](https://github.com/tanrax/org-social) feed.
//!
//! ## Overview
//!
//! An org-social file is parsed into its feed metadata (`#+TITLE:`, `#+NICK:`, ...) and the posts found
//! under its `* Posts` heading. Each valid post is then rendered through a Jinja-style template into its
//! own HTML file, ready to be served as the target of a social-media link preview.
//!
//! ## Features
//!
//! - **Org-social Parsing**: Split the `* Posts` section into posts and decode their property drawers
//! - **Content Formatting**: Turn mentions, links and line breaks into an HTML fragment
//! - **Relative Times**: Render post timestamps as short ages (`5min`, `3h`, `2d`)
//! - **Preview Generation**: Render every post through a template and write one file per post
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use org_social_preview::format::format_content;
//! use org_social_preview::parser;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let content = std::fs::read_to_string("social.org")?;
//!     let (metadata, posts) = parser::parse_file(&content);
//!
//!     println!("Feed author: {}", metadata.nick().unwrap_or("User"));
//!     for post in posts {
//!         println!("{}: {}", post.id(), format_content(post.content(), post.mood()));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod metadata;
pub mod parser;
pub mod post;
pub mod preview;
pub mod properties;
pub mod time;
pub mod tokenizer;

pub use error::{Error, Result};
