//! Command-line interface for the Portuguese tourism open-data layers.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod query;

pub use error::CliError;

use query::{QueryArgs, QueryKind, run_query};

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_OFFSET: &str = "offset";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_DISTRICT: &str = "district";
pub(crate) const ARG_TYPE: &str = "type";
pub(crate) const ARG_SORT: &str = "sort";
pub(crate) const ARG_FIELD: &str = "field";
pub(crate) const ARG_ID: &str = "id";
pub(crate) const ARG_PATH: &str = "path";
pub(crate) const ARG_HOST_MODE: &str = "host-mode";
pub(crate) const ARG_PROXY_ORIGIN: &str = "proxy-origin";
pub(crate) const ARG_RELAY_URL: &str = "relay-url";
pub(crate) const ARG_PROVIDER_URL: &str = "provider-url";
pub(crate) const ARG_USER_AGENT: &str = "user-agent";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_DRY_RUN: &str = "dry-run";
pub(crate) const ENV_DATASET: &str = "ROTEIRO_CMDS_QUERY_DATASET";
pub(crate) const ENV_FIELD: &str = "ROTEIRO_CMDS_QUERY_FIELD";
pub(crate) const ENV_ID: &str = "ROTEIRO_CMDS_QUERY_ID";
pub(crate) const ENV_PATH: &str = "ROTEIRO_CMDS_QUERY_PATH";

/// Run the Roteiro CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// query fails, or the output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let (kind, args) = cli.command.into_parts();
    run_query(kind, args)
}

#[derive(Debug, Parser)]
#[command(
    name = "roteiro",
    about = "Query the Portuguese tourism open-data layers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one page of a dataset.
    List(QueryArgs),
    /// Count the records matching the filters.
    Count(QueryArgs),
    /// Print the sorted distinct values of one field.
    Distinct(QueryArgs),
    /// Fetch one accommodation by registration number.
    Detail(QueryArgs),
    /// Fetch every record of a dataset in one request.
    All(QueryArgs),
    /// Resolve a front-end route and fetch what it displays.
    View(QueryArgs),
}

impl Command {
    fn into_parts(self) -> (QueryKind, QueryArgs) {
        match self {
            Self::List(args) => (QueryKind::List, args),
            Self::Count(args) => (QueryKind::Count, args),
            Self::Distinct(args) => (QueryKind::Distinct, args),
            Self::Detail(args) => (QueryKind::Detail, args),
            Self::All(args) => (QueryKind::All, args),
            Self::View(args) => (QueryKind::View, args),
        }
    }
}

#[cfg(test)]
mod tests;
