//! High-level client combining registry, builder, gateway and normalizer.

use log::debug;
use roteiro_core::{
    ApiHost, DatasetKey, FilterPredicate, LogicalField, NormalizedResult, PageWindow,
    QueryBuilder, QueryError, Record, Registry, RegistryError, ResponseError, SortField,
};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::gateway::{FeatureGateway, GatewayBuildError, GatewayError, HttpGateway, HttpGatewayConfig};

/// Errors raised by [`TourismClient`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The query URL could not be built.
    #[error(transparent)]
    Query(#[from] QueryError),
    /// The request failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The response could not be interpreted.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Errors raised while assembling a [`TourismClient`].
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The host did not yield valid endpoint URLs.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The HTTP gateway could not be built.
    #[error(transparent)]
    Gateway(#[from] GatewayBuildError),
}

/// Typed access to the tourism datasets.
///
/// Every operation issues exactly one gateway request. The client holds no
/// mutable state, so it is `Send + Sync` whenever its gateway is.
///
/// # Example
///
/// ```no_run
/// use roteiro_core::{ApiHost, DatasetKey, FilterPredicate, PageWindow};
/// use roteiro_data::{HttpGatewayConfig, TourismClient};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TourismClient::http(&ApiHost::default(), HttpGatewayConfig::default())?;
/// let filters = FilterPredicate::new().with_district("Faro");
/// let page = client
///     .list_page(DatasetKey::Ea, PageWindow::default(), &filters, None)
///     .await?;
/// for record in &page.records {
///     println!("{:?}", record.name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TourismClient<G> {
    registry: Registry,
    gateway: G,
}

impl TourismClient<HttpGateway> {
    /// Client for the standard datasets under `host`, over HTTP.
    ///
    /// # Errors
    /// Returns [`ClientBuildError`] when the host yields invalid URLs or the
    /// HTTP client cannot be built.
    pub fn http(host: &ApiHost, config: HttpGatewayConfig) -> Result<Self, ClientBuildError> {
        let registry = Registry::standard(host)?;
        let gateway = HttpGateway::with_config(config)?;
        Ok(Self::new(registry, gateway))
    }
}

impl<G: FeatureGateway> TourismClient<G> {
    /// Combine a registry with a gateway.
    #[must_use]
    pub const fn new(registry: Registry, gateway: G) -> Self {
        Self { registry, gateway }
    }

    /// Registry the client resolves datasets against.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Query builder over the client's registry.
    #[must_use]
    pub const fn builder(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(&self.registry)
    }

    /// One page of records.
    ///
    /// # Errors
    /// Returns [`ClientError`] when the query cannot be built, the request
    /// fails, or the response is malformed.
    pub async fn list_page(
        &self,
        key: DatasetKey,
        page: PageWindow,
        filters: &FilterPredicate,
        sort: Option<SortField>,
    ) -> Result<NormalizedResult, ClientError> {
        let url = self.builder().list(key, page, filters, sort)?;
        self.records(key, &url).await
    }

    /// Number of records matching `filters`.
    ///
    /// # Errors
    /// Returns [`ClientError`] as for [`Self::list_page`], including
    /// [`ResponseError::MissingCount`].
    pub async fn count(&self, key: DatasetKey, filters: &FilterPredicate) -> Result<u64, ClientError> {
        let url = self.builder().count(key, filters)?;
        let body = self.fetch(&url).await?;
        Ok(roteiro_core::count(body)?)
    }

    /// Sorted distinct values of `field`.
    ///
    /// # Errors
    /// Returns [`ClientError`] as for [`Self::list_page`].
    pub async fn distinct(
        &self,
        key: DatasetKey,
        field: LogicalField,
    ) -> Result<Vec<String>, ClientError> {
        let url = self.builder().distinct(key, field)?;
        let body = self.fetch(&url).await?;
        let descriptor = self.registry.resolve(key).map_err(QueryError::from)?;
        Ok(roteiro_core::distinct_values(body, descriptor, field)?)
    }

    /// Sorted distinct districts, for filter drop-downs.
    ///
    /// # Errors
    /// Returns [`ClientError`] as for [`Self::distinct`].
    pub async fn unique_districts(&self, key: DatasetKey) -> Result<Vec<String>, ClientError> {
        self.distinct(key, LogicalField::District).await
    }

    /// Sorted distinct typologies or modalities.
    ///
    /// # Errors
    /// Returns [`ClientError`] as for [`Self::distinct`].
    pub async fn unique_types(&self, key: DatasetKey) -> Result<Vec<String>, ClientError> {
        self.distinct(key, LogicalField::Kind).await
    }

    /// The record with identifier `id`, or `None` when nothing matches.
    ///
    /// # Errors
    /// Returns [`ClientError`] as for [`Self::list_page`].
    pub async fn detail(&self, key: DatasetKey, id: &str) -> Result<Option<Record>, ClientError> {
        let url = self.builder().detail(key, id)?;
        let result = self.records(key, &url).await?;
        Ok(result.records.into_iter().next())
    }

    /// Every record of the dataset with the detail projection.
    ///
    /// # Errors
    /// Returns [`ClientError`] as for [`Self::list_page`].
    pub async fn list_all(&self, key: DatasetKey) -> Result<NormalizedResult, ClientError> {
        let url = self.builder().all(key)?;
        self.records(key, &url).await
    }

    async fn records(&self, key: DatasetKey, url: &Url) -> Result<NormalizedResult, ClientError> {
        let body = self.fetch(url).await?;
        let descriptor = self.registry.resolve(key).map_err(QueryError::from)?;
        Ok(roteiro_core::to_records(body, descriptor)?)
    }

    async fn fetch(&self, url: &Url) -> Result<Value, ClientError> {
        debug!("requesting {url}");
        Ok(self.gateway.get(url).await?)
    }
}
