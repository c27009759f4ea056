//! Inline markup tokenizer for post content.
//!
//! Content is split into typed tokens by an ordered series of passes:
//! mentions, then described links, then plain links, then line breaks. Each pass
//! only looks inside the `PlainText` tokens left over by the previous ones, so
//! text that already became a link is never matched again.

/// Represents a single token in the input text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Plain text token, fallback for when no implemented syntax is detected
    PlainText(String),
    /// Org-social mention token, `[[org-social:<reference>][<label>]]`
    Mention { reference: String, label: String },
    /// Link token, `[[<url>][<description>]]` or `[[<url>]]`
    Link {
        url: String,
        description: Option<String>,
    },
    /// A `\n` in the content
    LineBreak,
}

const MENTION_PREFIX: &str = "[[org-social:";

/// A pass recognises one kind of markup at the start of its input and returns
/// the token plus the number of bytes consumed.
type Pass = fn(&str) -> Option<(Token, usize)>;

pub struct Tokenizer {
    input: String,
}

impl Tokenizer {
    pub fn new(input: String) -> Self {
        Self { input }
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = vec![Token::PlainText(std::mem::take(&mut self.input))];

        let passes: [Pass; 3] = [parse_mention, parse_described_link, parse_plain_link];
        for pass in passes {
            tokens = apply_pass(tokens, pass);
        }

        split_line_breaks(tokens)
    }
}

fn apply_pass(tokens: Vec<Token>, pass: Pass) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::PlainText(text) => scan_text(&text, pass, &mut output),
            other => output.push(other),
        }
    }

    output
}

/// Leftmost, non-overlapping scan of `text` for the markup recognised by `pass`.
fn scan_text(text: &str, pass: Pass, output: &mut Vec<Token>) {
    let mut position = 0;
    let mut plain_start = 0;

    while let Some(found) = text[position..].find("[[") {
        let start = position + found;
        match pass(&text[start..]) {
            Some((token, consumed)) => {
                if start > plain_start {
                    output.push(Token::PlainText(text[plain_start..start].to_string()));
                }
                output.push(token);
                position = start + consumed;
                plain_start = position;
            }
            // '[' is one byte, so this stays on a char boundary.
            None => position = start + 1,
        }
    }

    if plain_start < text.len() {
        output.push(Token::PlainText(text[plain_start..].to_string()));
    }
}

fn split_line_breaks(tokens: Vec<Token>) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::PlainText(text) => {
                for (i, piece) in text.split('\n').enumerate() {
                    if i > 0 {
                        output.push(Token::LineBreak);
                    }
                    if !piece.is_empty() {
                        output.push(Token::PlainText(piece.to_string()));
                    }
                }
            }
            other => output.push(other),
        }
    }

    output
}

/// `[[org-social:<reference>][<label>]]`
fn parse_mention(input: &str) -> Option<(Token, usize)> {
    let rest = input.strip_prefix(MENTION_PREFIX)?;
    let (reference, rest) = take_bracket_free(rest)?;
    let rest = rest.strip_prefix("][")?;
    let (label, rest) = take_bracket_free(rest)?;
    let rest = rest.strip_prefix("]]")?;

    let token = Token::Mention {
        reference: reference.to_string(),
        label: label.to_string(),
    };
    Some((token, input.len() - rest.len()))
}

/// `[[<url>][<description>]]`
fn parse_described_link(input: &str) -> Option<(Token, usize)> {
    let rest = input.strip_prefix("[[")?;
    let (url, rest) = take_bracket_free(rest)?;
    let rest = rest.strip_prefix("][")?;
    let (description, rest) = take_bracket_free(rest)?;
    let rest = rest.strip_prefix("]]")?;

    let token = Token::Link {
        url: url.to_string(),
        description: Some(description.to_string()),
    };
    Some((token, input.len() - rest.len()))
}

/// `[[<url>]]`
fn parse_plain_link(input: &str) -> Option<(Token, usize)> {
    let rest = input.strip_prefix("[[")?;
    let (url, rest) = take_bracket_free(rest)?;
    let rest = rest.strip_prefix("]]")?;

    let token = Token::Link {
        url: url.to_string(),
        description: None,
    };
    Some((token, input.len() - rest.len()))
}

/// Split off the non-empty run of characters before the next `]`.
fn take_bracket_free(input: &str) -> Option<(&str, &str)> {
    let end = input.find(']')?;
    if end == 0 {
        return None;
    }
    Some(input.split_at(end))
}
