//! CLI argument parsing and logging setup for the preview generator binary.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{self, Config};

/// Generate HTML previews for Org Social posts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the org-social file.
    #[arg(short, long, default_value = config::DEFAULT_SOCIAL_FILE)]
    pub social_file: PathBuf,

    /// Directory the previews are written to. Existing `.html` files in it are removed.
    #[arg(short, long, default_value = config::DEFAULT_PREVIEW_DIR)]
    pub preview_dir: PathBuf,

    /// Directory holding the template.
    #[arg(long, alias = "td", default_value = config::DEFAULT_TEMPLATE_DIR)]
    pub template_dir: PathBuf,

    /// Template file name inside the template directory.
    #[arg(long, alias = "tn", default_value = config::DEFAULT_TEMPLATE_NAME)]
    pub template_name: String,

    /// Public URL of the feed, used for post permalinks.
    #[arg(long, env = "ORG_SOCIAL_FEED_URL")]
    pub feed_url: Option<String>,

    /// Entity-escape post content before embedding it.
    #[arg(long)]
    pub escape_html: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config::new(args.social_file, args.preview_dir)
            .with_template(args.template_dir, args.template_name)
            .with_feed_url(args.feed_url)
            .with_escape_html(args.escape_html)
    }
}

/// Initialise tracing-based logging.
///
/// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
