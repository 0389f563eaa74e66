//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use roteiro_cli::{CliError, run};
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("roteiro: {err}");
            std::process::exit(1);
        }
    }
}
