use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use org_social_preview::cli::{self, Args};
use org_social_preview::config::Config;
use org_social_preview::generator;

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.verbose, args.quiet);

    let config = Config::from(args);
    match generator::generate_all(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
