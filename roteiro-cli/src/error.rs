//! Error types emitted by the Roteiro CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use roteiro_core::{
    HostModeError, PageWindowError, ParseSortError, QueryError, RegistryError, RouteError,
    UnknownDatasetError, UnknownFieldError,
};
use roteiro_data::{ClientError, GatewayBuildError};
use thiserror::Error;

/// Errors emitted by the Roteiro CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The dataset key is not recognised.
    #[error(transparent)]
    UnknownDataset(#[from] UnknownDatasetError),
    /// The `--field` value is not a logical field name.
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
    /// The `--sort` value is malformed.
    #[error("invalid sort: {0}")]
    InvalidSort(#[from] ParseSortError),
    /// The page window is empty.
    #[error("invalid page: {0}")]
    InvalidPage(#[from] PageWindowError),
    /// The `--host-mode` value is not recognised.
    #[error(transparent)]
    InvalidHostMode(#[from] HostModeError),
    /// The `view` path does not name a route.
    #[error(transparent)]
    Route(#[from] RouteError),
    /// The configured host does not yield valid endpoint URLs.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The query URL could not be built.
    #[error(transparent)]
    Query(#[from] QueryError),
    /// The HTTP gateway could not be constructed.
    #[error("failed to build HTTP gateway: {0}")]
    BuildGateway(#[from] GatewayBuildError),
    /// The query failed.
    #[error("query failed: {0}")]
    Client(#[from] ClientError),
    /// The async runtime could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serializing the query output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the output file failed.
    #[error("failed to write output to {path:?}: {source}")]
    WriteOutputFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
