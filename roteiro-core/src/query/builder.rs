//! URL construction for listing, counting, distinct and detail queries.

use url::Url;

use crate::{
    dataset::{DatasetDescriptor, DatasetKey, LogicalField, Projection},
    registry::Registry,
};

use super::{
    FilterPredicate, PageWindow, QueryError, SortField,
    filter::{MATCH_ALL, equality_term, where_clause},
};

/// Spatial reference requested for every query (WGS 84).
const OUT_SR: &str = "4326";

/// Builds ArcGIS query URLs against a [`Registry`].
///
/// # Examples
/// ```
/// use roteiro_core::{ApiHost, DatasetKey, QueryBuilder, Registry};
///
/// let registry = Registry::standard(&ApiHost::default())?;
/// let url = QueryBuilder::new(&registry).detail(DatasetKey::Ea, "12345")?;
/// assert!(url.as_str().contains("where=NrRNAL+%3D+12345"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'a> {
    registry: &'a Registry,
}

impl<'a> QueryBuilder<'a> {
    /// Build queries against `registry`.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// One page of a dataset, projected onto its list fields.
    ///
    /// # Errors
    /// Returns [`QueryError`] when the dataset is unknown, a filter or sort
    /// field is unmapped, or a numeric filter value is not a number.
    pub fn list(
        &self,
        key: DatasetKey,
        page: PageWindow,
        filters: &FilterPredicate,
        sort: Option<SortField>,
    ) -> Result<Url, QueryError> {
        let descriptor = self.registry.resolve(key)?;
        let mut pairs = vec![
            ("where", where_clause(descriptor, filters)?),
            ("outFields", descriptor.output_fields(Projection::List)),
        ];
        pairs.extend(projection_params());
        pairs.push(("resultOffset", page.offset().to_string()));
        pairs.push(("resultRecordCount", page.limit().to_string()));
        if let Some(SortField { field, order }) = sort {
            let name = provider_name(descriptor, field)?;
            pairs.push(("orderByFields", format!("{name} {order}")));
        }
        Ok(with_params(descriptor, pairs))
    }

    /// Number of records matching `filters`.
    ///
    /// # Errors
    /// Returns [`QueryError`] under the same conditions as [`Self::list`].
    pub fn count(&self, key: DatasetKey, filters: &FilterPredicate) -> Result<Url, QueryError> {
        let descriptor = self.registry.resolve(key)?;
        let pairs = vec![
            ("where", where_clause(descriptor, filters)?),
            ("returnCountOnly", "true".to_owned()),
            ("f", "json".to_owned()),
        ];
        Ok(with_params(descriptor, pairs))
    }

    /// Distinct values of `field` across the whole dataset.
    ///
    /// # Errors
    /// Returns [`QueryError`] when the dataset is unknown or `field` is
    /// unmapped.
    pub fn distinct(&self, key: DatasetKey, field: LogicalField) -> Result<Url, QueryError> {
        let descriptor = self.registry.resolve(key)?;
        let mut pairs = vec![
            ("where", MATCH_ALL.to_owned()),
            ("outFields", provider_name(descriptor, field)?.to_owned()),
        ];
        pairs.extend(projection_params());
        pairs.push(("returnDistinctValues", "true".to_owned()));
        Ok(with_params(descriptor, pairs))
    }

    /// The record whose identifier equals `id`, with the detail projection.
    ///
    /// Text identifiers are quoted; numeric identifiers must be numbers.
    ///
    /// # Errors
    /// Returns [`QueryError`] when the dataset is unknown, has no identifier,
    /// or `id` is not a valid literal for it.
    pub fn detail(&self, key: DatasetKey, id: &str) -> Result<Url, QueryError> {
        let descriptor = self.registry.resolve(key)?;
        let spec = descriptor
            .field(LogicalField::Id)
            .ok_or(QueryError::UnmappedField {
                dataset: key,
                field: LogicalField::Id,
            })?;
        let mut pairs = vec![
            ("where", equality_term(spec, id)?),
            ("outFields", descriptor.output_fields(Projection::Detail)),
        ];
        pairs.extend(projection_params());
        Ok(with_params(descriptor, pairs))
    }

    /// Every record of a dataset with the detail projection, unpaginated.
    ///
    /// The provider caps the response size; check
    /// `exceeded_transfer_limit` on the normalized result.
    ///
    /// # Errors
    /// Returns [`QueryError::UnknownDataset`] when the dataset is unknown.
    pub fn all(&self, key: DatasetKey) -> Result<Url, QueryError> {
        let descriptor = self.registry.resolve(key)?;
        let mut pairs = vec![
            ("where", MATCH_ALL.to_owned()),
            ("outFields", descriptor.output_fields(Projection::Detail)),
        ];
        pairs.extend(projection_params());
        Ok(with_params(descriptor, pairs))
    }
}

fn projection_params() -> [(&'static str, String); 3] {
    [
        ("returnGeometry", "false".to_owned()),
        ("outSR", OUT_SR.to_owned()),
        ("f", "json".to_owned()),
    ]
}

fn provider_name(
    descriptor: &DatasetDescriptor,
    field: LogicalField,
) -> Result<&str, QueryError> {
    descriptor
        .field(field)
        .map(|spec| spec.name.as_str())
        .ok_or(QueryError::UnmappedField {
            dataset: descriptor.key(),
            field,
        })
}

fn with_params(descriptor: &DatasetDescriptor, pairs: Vec<(&'static str, String)>) -> Url {
    let mut url = descriptor.base_url().clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url
}
