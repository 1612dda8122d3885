#![forbid(unsafe_code)]

//! Font browser demo binary entry point.

use std::io;
use std::process::ExitCode;

use fdl_demo::{app, cli};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let opts = cli::Opts::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let result = app::load_catalog(&opts)
        .and_then(|catalog| app::run(&opts, catalog, &mut io::stdout().lock()));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "demo failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
