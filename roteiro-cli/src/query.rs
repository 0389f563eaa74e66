//! Query subcommands for the Roteiro CLI.

use std::{future::Future, io::Write, time::Duration};

use camino::Utf8PathBuf;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use roteiro_core::{
    AccommodationApi, ApiHost, DatasetKey, FilterPredicate, HostMode, LogicalField,
    NormalizedResult, PageWindow, QueryBuilder, QueryError, Record, Registry, SortField, View,
};
use roteiro_data::{FeatureGateway, HttpGateway, HttpGatewayConfig, TourismClient};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    ARG_DATASET, ARG_DISTRICT, ARG_DRY_RUN, ARG_FIELD, ARG_HOST_MODE, ARG_ID, ARG_LIMIT,
    ARG_OFFSET, ARG_OUTPUT, ARG_PATH, ARG_PROVIDER_URL, ARG_PROXY_ORIGIN, ARG_RELAY_URL,
    ARG_SORT, ARG_TIMEOUT_SECS, ARG_TYPE, ARG_USER_AGENT, CliError, ENV_DATASET, ENV_FIELD,
    ENV_ID, ENV_PATH,
};

/// Subcommand a set of [`QueryArgs`] was given to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryKind {
    List,
    Count,
    Distinct,
    Detail,
    All,
    View,
}

/// CLI arguments shared by the query subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "query",
    long_about = "Query one of the tourism datasets (et, ea, casinos, bingos). \
                 Options can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Query a tourism dataset"
)]
#[ortho_config(prefix = "ROTEIRO")]
pub(crate) struct QueryArgs {
    /// Dataset key: et, ea, casinos or bingos.
    #[arg(value_name = "dataset")]
    #[serde(default)]
    pub(crate) dataset: Option<String>,
    /// Zero-based index of the first record (list, view).
    #[arg(long = ARG_OFFSET, value_name = "n")]
    #[serde(default)]
    pub(crate) offset: Option<u64>,
    /// Maximum number of records per page (list, view).
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<u64>,
    /// Keep only records in this district.
    #[arg(long = ARG_DISTRICT, value_name = "name")]
    #[serde(default)]
    pub(crate) district: Option<String>,
    /// Keep only records of this typology or modality.
    #[arg(long = ARG_TYPE, value_name = "name")]
    #[serde(default)]
    pub(crate) typology: Option<String>,
    /// Sort order as `field[:asc|desc]` (list).
    #[arg(long = ARG_SORT, value_name = "field[:order]")]
    #[serde(default)]
    pub(crate) sort: Option<String>,
    /// Logical field whose values to collect (distinct).
    #[arg(long = ARG_FIELD, value_name = "field")]
    #[serde(default)]
    pub(crate) field: Option<String>,
    /// Registration number to fetch (detail).
    #[arg(long = ARG_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Front-end route to resolve (view).
    #[arg(long = ARG_PATH, value_name = "route")]
    #[serde(default)]
    pub(crate) path: Option<String>,
    /// How to reach the provider: direct, relay or proxy.
    #[arg(long = ARG_HOST_MODE, value_name = "mode")]
    #[serde(default)]
    pub(crate) host_mode: Option<String>,
    /// Origin of the development proxy (proxy mode).
    #[arg(long = ARG_PROXY_ORIGIN, value_name = "url")]
    #[serde(default)]
    pub(crate) proxy_origin: Option<String>,
    /// Origin of the CORS relay (relay mode).
    #[arg(long = ARG_RELAY_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) relay_url: Option<String>,
    /// Origin of the ArcGIS provider.
    #[arg(long = ARG_PROVIDER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) provider_url: Option<String>,
    /// User agent sent with every request.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Overall request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Write the JSON output to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Print the query URL without fetching it.
    #[arg(long = ARG_DRY_RUN)]
    #[serde(default)]
    pub(crate) dry_run: bool,
}

impl QueryArgs {
    pub(crate) fn into_config(self, kind: QueryKind) -> Result<QueryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QueryConfig::try_from((kind, merged))
    }
}

/// What a resolved query subcommand asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operation {
    List {
        dataset: DatasetKey,
        page: PageWindow,
        filters: FilterPredicate,
        sort: Option<SortField>,
    },
    Count {
        dataset: DatasetKey,
        filters: FilterPredicate,
    },
    Distinct {
        dataset: DatasetKey,
        field: LogicalField,
    },
    Detail {
        dataset: DatasetKey,
        id: String,
    },
    All {
        dataset: DatasetKey,
    },
    /// `listing`, `page` and `filters` only apply to the accommodations view.
    View {
        view: View,
        listing: AccommodationApi,
        page: PageWindow,
        filters: FilterPredicate,
    },
}

impl Operation {
    /// Query URL for the operation, or `None` when the view fetches nothing.
    pub(crate) fn url(&self, builder: QueryBuilder<'_>) -> Result<Option<Url>, QueryError> {
        let url = match self {
            Self::List {
                dataset,
                page,
                filters,
                sort,
            } => builder.list(*dataset, *page, filters, *sort)?,
            Self::Count { dataset, filters } => builder.count(*dataset, filters)?,
            Self::Distinct { dataset, field } => builder.distinct(*dataset, *field)?,
            Self::Detail { dataset, id } => builder.detail(*dataset, id)?,
            Self::All { dataset } => builder.all(*dataset)?,
            Self::View {
                view,
                listing,
                page,
                filters,
            } => match view {
                View::Home => return Ok(None),
                View::Accommodations => builder.list(listing.dataset(), *page, filters, None)?,
                View::AccommodationDetails { api, id } => builder.detail(api.dataset(), id)?,
                View::Casinos => builder.all(DatasetKey::Casinos)?,
                View::Bingos => builder.all(DatasetKey::Bingos)?,
            },
        };
        Ok(Some(url))
    }
}

/// Resolved query subcommand configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QueryConfig {
    pub(crate) operation: Operation,
    pub(crate) host: ApiHost,
    pub(crate) gateway: HttpGatewayConfig,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) dry_run: bool,
}

impl TryFrom<(QueryKind, QueryArgs)> for QueryConfig {
    type Error = CliError;

    fn try_from((kind, args): (QueryKind, QueryArgs)) -> Result<Self, Self::Error> {
        let QueryArgs {
            dataset,
            offset,
            limit,
            district,
            typology,
            sort,
            field,
            id,
            path,
            host_mode,
            proxy_origin,
            relay_url,
            provider_url,
            user_agent,
            timeout_secs,
            output,
            dry_run,
        } = args;

        let operation = match kind {
            QueryKind::List => Operation::List {
                dataset: dataset_key(dataset)?,
                page: page_window(offset, limit)?,
                filters: filter_predicate(district, typology),
                sort: sort.as_deref().map(str::parse).transpose()?,
            },
            QueryKind::Count => Operation::Count {
                dataset: dataset_key(dataset)?,
                filters: filter_predicate(district, typology),
            },
            QueryKind::Distinct => Operation::Distinct {
                dataset: dataset_key(dataset)?,
                field: required(field, ARG_FIELD, ENV_FIELD)?.parse()?,
            },
            QueryKind::Detail => Operation::Detail {
                dataset: dataset_key(dataset)?,
                id: required(id, ARG_ID, ENV_ID)?,
            },
            QueryKind::All => Operation::All {
                dataset: dataset_key(dataset)?,
            },
            QueryKind::View => Operation::View {
                view: View::from_path(&required(path, ARG_PATH, ENV_PATH)?)?,
                listing: dataset
                    .as_deref()
                    .map(str::parse)
                    .transpose()?
                    .unwrap_or(AccommodationApi::Et),
                page: page_window(offset, limit)?,
                filters: filter_predicate(district, typology),
            },
        };

        let mode = host_mode
            .as_deref()
            .map(str::parse::<HostMode>)
            .transpose()?
            .unwrap_or_default();
        let host = ApiHost::for_mode(mode, proxy_origin, relay_url, provider_url);

        let mut gateway = HttpGatewayConfig::new();
        if let Some(agent) = user_agent {
            gateway = gateway.with_user_agent(agent);
        }
        if let Some(secs) = timeout_secs {
            gateway = gateway.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            operation,
            host,
            gateway,
            output,
            dry_run,
        })
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<String, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

fn dataset_key(value: Option<String>) -> Result<DatasetKey, CliError> {
    Ok(required(value, ARG_DATASET, ENV_DATASET)?.parse()?)
}

fn page_window(offset: Option<u64>, limit: Option<u64>) -> Result<PageWindow, CliError> {
    let defaults = PageWindow::default();
    Ok(PageWindow::new(
        offset.unwrap_or(defaults.offset()),
        limit.unwrap_or(defaults.limit()),
    )?)
}

fn filter_predicate(district: Option<String>, typology: Option<String>) -> FilterPredicate {
    let mut filters = FilterPredicate::new();
    if let Some(name) = district {
        filters = filters.with_district(name);
    }
    if let Some(name) = typology {
        filters = filters.with_type(name);
    }
    filters
}

/// JSON document written by a query subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum QueryOutput {
    Records(NormalizedResult),
    Count {
        dataset: DatasetKey,
        count: u64,
    },
    Values {
        dataset: DatasetKey,
        field: LogicalField,
        values: Vec<String>,
    },
    Detail {
        dataset: DatasetKey,
        record: Option<Record>,
    },
    View {
        #[serde(flatten)]
        view: View,
        result: Option<Box<QueryOutput>>,
    },
}

/// Builds the gateway for the current query invocation.
pub(crate) trait GatewayFactory {
    fn build(&self, config: &HttpGatewayConfig) -> Result<Box<dyn FeatureGateway>, CliError>;
}

pub(crate) struct HttpGatewayFactory;

impl GatewayFactory for HttpGatewayFactory {
    fn build(&self, config: &HttpGatewayConfig) -> Result<Box<dyn FeatureGateway>, CliError> {
        Ok(Box::new(HttpGateway::with_config(config.clone())?))
    }
}

pub(crate) fn run_query(kind: QueryKind, args: QueryArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_query_with(kind, args, &HttpGatewayFactory, &mut stdout)
}

pub(crate) fn run_query_with(
    kind: QueryKind,
    args: QueryArgs,
    factory: &dyn GatewayFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config(kind)?;
    run_config(&config, factory, writer)
}

pub(crate) fn run_config(
    config: &QueryConfig,
    factory: &dyn GatewayFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let registry = Registry::standard(&config.host)?;
    if config.dry_run {
        return match config.operation.url(QueryBuilder::new(&registry))? {
            Some(url) => write_payload(config, writer, &format!("{url}\n")),
            None => Ok(()),
        };
    }
    let client = TourismClient::new(registry, factory.build(&config.gateway)?);
    let output = block_on(execute(&config.operation, &client))??;
    let mut payload = serde_json::to_string_pretty(&output).map_err(CliError::SerializeOutput)?;
    payload.push('\n');
    write_payload(config, writer, &payload)
}

async fn execute<G: FeatureGateway>(
    operation: &Operation,
    client: &TourismClient<G>,
) -> Result<QueryOutput, CliError> {
    let output = match operation {
        Operation::List {
            dataset,
            page,
            filters,
            sort,
        } => QueryOutput::Records(client.list_page(*dataset, *page, filters, *sort).await?),
        Operation::Count { dataset, filters } => QueryOutput::Count {
            dataset: *dataset,
            count: client.count(*dataset, filters).await?,
        },
        Operation::Distinct { dataset, field } => QueryOutput::Values {
            dataset: *dataset,
            field: *field,
            values: client.distinct(*dataset, *field).await?,
        },
        Operation::Detail { dataset, id } => QueryOutput::Detail {
            dataset: *dataset,
            record: client.detail(*dataset, id).await?,
        },
        Operation::All { dataset } => QueryOutput::Records(client.list_all(*dataset).await?),
        Operation::View {
            view,
            listing,
            page,
            filters,
        } => {
            let result = match view {
                View::Home => None,
                View::Accommodations => Some(QueryOutput::Records(
                    client
                        .list_page(listing.dataset(), *page, filters, None)
                        .await?,
                )),
                View::AccommodationDetails { api, id } => Some(QueryOutput::Detail {
                    dataset: api.dataset(),
                    record: client.detail(api.dataset(), id).await?,
                }),
                View::Casinos => Some(QueryOutput::Records(
                    client.list_all(DatasetKey::Casinos).await?,
                )),
                View::Bingos => Some(QueryOutput::Records(
                    client.list_all(DatasetKey::Bingos).await?,
                )),
            };
            QueryOutput::View {
                view: view.clone(),
                result: result.map(Box::new),
            }
        }
    };
    Ok(output)
}

fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(runtime.block_on(future))
}

fn write_payload(
    config: &QueryConfig,
    writer: &mut dyn Write,
    payload: &str,
) -> Result<(), CliError> {
    match &config.output {
        Some(path) => {
            roteiro_fs::write_output_file(path, payload.as_bytes()).map_err(|source| {
                CliError::WriteOutputFile {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!("wrote {} bytes to {path}", payload.len());
            Ok(())
        }
        None => writer
            .write_all(payload.as_bytes())
            .map_err(CliError::WriteOutput),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    kind: QueryKind,
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QueryConfig, CliError> {
    let merged = QueryArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QueryConfig::try_from((kind, merged))
}
