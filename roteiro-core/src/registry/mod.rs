//! Endpoint registry mapping dataset keys to descriptors.
//!
//! The registry is built once at startup from an [`ApiHost`] and is
//! read-only afterwards. Lookups never touch the network.

mod host;
mod schema;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::dataset::{DatasetDescriptor, DatasetKey, UnknownDatasetError};

pub use host::{
    ApiHost, DEFAULT_PROVIDER, DEFAULT_PROXY_ORIGIN, DEFAULT_RELAY, HostMode, HostModeError,
    PROXY_PREFIX,
};

/// Errors raised while building a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The host base and service path did not form a valid URL.
    #[error("invalid endpoint URL for {dataset} under {base:?}: {source}")]
    InvalidBaseUrl {
        /// Dataset whose endpoint failed to parse.
        dataset: DatasetKey,
        /// Host base the service path was appended to.
        base: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Immutable mapping from [`DatasetKey`] to [`DatasetDescriptor`].
///
/// # Examples
/// ```
/// use roteiro_core::{ApiHost, DatasetKey, LogicalField, Registry};
///
/// let registry = Registry::standard(&ApiHost::proxy("http://localhost:5173"))?;
/// let et = registry.resolve(DatasetKey::Et)?;
/// assert_eq!(
///     et.base_url().as_str(),
///     "http://localhost:5173/api/arcgis/rest/services/TDP/OpenData_ETExistentes/MapServer/0/query",
/// );
/// assert_eq!(et.field(LogicalField::Id).map(|spec| spec.name.as_str()), Some("NrRNET"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    datasets: BTreeMap<DatasetKey, DatasetDescriptor>,
}

impl Registry {
    /// A registry with no datasets.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            datasets: BTreeMap::new(),
        }
    }

    /// Register every published dataset under `host`.
    ///
    /// # Errors
    /// Returns [`RegistryError::InvalidBaseUrl`] when the host base does not
    /// produce valid endpoint URLs.
    pub fn standard(host: &ApiHost) -> Result<Self, RegistryError> {
        let base = host.base();
        DatasetKey::ALL
            .into_iter()
            .try_fold(Self::empty(), |registry, key| {
                let url = schema::endpoint(&base, key).map_err(|source| {
                    RegistryError::InvalidBaseUrl {
                        dataset: key,
                        base: base.clone(),
                        source,
                    }
                })?;
                Ok(registry.with_dataset(schema::descriptor(key, url)))
            })
    }

    /// Add or replace the descriptor for its dataset key.
    #[must_use]
    pub fn with_dataset(mut self, descriptor: DatasetDescriptor) -> Self {
        self.datasets.insert(descriptor.key(), descriptor);
        self
    }

    /// Look up the descriptor for `key`.
    ///
    /// # Errors
    /// Returns [`UnknownDatasetError`] when `key` was never registered.
    pub fn resolve(&self, key: DatasetKey) -> Result<&DatasetDescriptor, UnknownDatasetError> {
        self.datasets.get(&key).ok_or_else(|| UnknownDatasetError {
            key: key.to_string(),
        })
    }

    /// Registered dataset keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = DatasetKey> + '_ {
        self.datasets.keys().copied()
    }
}
