//! Error types for preview generation.
//!
//! Parsing and formatting never fail; only reading the feed, loading the
//! template and writing previews can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a preview generation run.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The org-social file does not exist.
    #[error("{} not found", .0.display())]
    MissingInput(PathBuf),

    /// The template file does not exist.
    #[error("template {} not found", .0.display())]
    MissingTemplate(PathBuf),

    /// The template could not be loaded or rendered.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
