//! Parser module for org-social file format.
//!
//! This module turns a complete org-social file into its feed metadata and the
//! ordered list of valid posts found under the `* Posts` heading.

use tracing::{debug, warn};

pub use crate::metadata::Metadata;
pub use crate::post::Post;

/// Parse an org-social formatted file into its metadata and list of posts.
///
/// Posts keep their document order. Blocks whose post has no `ID` are dropped
/// without error. Parsing holds no state between calls, so parsing the same
/// input twice always gives the same result.
///
/// # Arguments
///
/// * `file_content` - The raw content of the org-social file
///
/// # Returns
///
/// A tuple containing the parsed metadata and a vector of posts.
pub fn parse_file(file_content: &str) -> (Metadata, Vec<Post>) {
    let metadata = Metadata::from(file_content);

    let mut posts = Vec::new();
    for block in segment_posts(file_content) {
        let post = Post::from(block);
        if post.is_valid() {
            debug!("Post added with ID: {}", post.id());
            posts.push(post);
        }
    }

    (metadata, posts)
}

/// Split the `* Posts` section into raw post blocks.
///
/// Each bare `**` line starts a block, which runs up to the start of the next
/// `**` line or to the end of the document. Blocks are trimmed and blank ones
/// are skipped. A missing section or a section without headers yields no
/// blocks.
pub fn segment_posts(document: &str) -> Vec<&str> {
    let Some(section_start) = find_posts_section(document) else {
        warn!("Posts section not found");
        return Vec::new();
    };
    let section = &document[section_start..];

    // (start of the delimiter line, start of the block after it)
    let delimiters: Vec<(usize, usize)> = lines_with_offsets(section)
        .filter(|(_, _, line)| is_post_delimiter(line))
        .map(|(line_start, next_line_start, _)| (line_start, next_line_start))
        .collect();

    if delimiters.is_empty() {
        warn!("No headers found in Posts section");
        return Vec::new();
    }
    debug!("Found {} headers", delimiters.len());

    delimiters
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, block_start))| {
            let block_end = delimiters
                .get(i + 1)
                .map(|&(next_line_start, _)| next_line_start)
                .unwrap_or(section.len());
            let block = section[block_start..block_end].trim();
            (!block.is_empty()).then_some(block)
        })
        .collect()
}

/// Byte offset just past the `* Posts` heading line, if there is one.
fn find_posts_section(document: &str) -> Option<usize> {
    lines_with_offsets(document)
        .find(|(_, _, line)| is_posts_heading(line))
        .map(|(_, next_line_start, _)| next_line_start)
}

fn is_posts_heading(line: &str) -> bool {
    match line.trim().strip_prefix('*') {
        Some(rest) => rest.starts_with(char::is_whitespace) && rest.trim() == "Posts",
        None => false,
    }
}

fn is_post_delimiter(line: &str) -> bool {
    line.trim_end() == "**"
}

/// Iterate over lines as `(line_start, next_line_start, line)`, where `line`
/// excludes its terminator.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.trim_end_matches('\n').trim_end_matches('\r');
        (start, offset, line)
    })
}
