//! Core domain types for the Roteiro open-data client.
//!
//! Responsibilities:
//! - Describe the tourism datasets published as ArcGIS `MapServer` layers
//!   (tourist developments, local lodging, casinos and bingo halls).
//! - Assemble ArcGIS REST query URLs from typed pagination, filter and sort
//!   inputs.
//! - Normalize provider attribute names into dataset-agnostic records.
//!
//! Boundaries:
//! - No network I/O lives here; the HTTP gateway is in `roteiro-data`.
//! - Descriptors are immutable once the [`Registry`] has been built.
//!
//! # Examples
//!
//! ```
//! use roteiro_core::{ApiHost, DatasetKey, FilterPredicate, PageWindow, QueryBuilder, Registry};
//!
//! let registry = Registry::standard(&ApiHost::default())?;
//! let builder = QueryBuilder::new(&registry);
//! let filters = FilterPredicate::new().with_district("Faro");
//! let url = builder.list(DatasetKey::Et, PageWindow::default(), &filters, None)?;
//! assert!(url.as_str().contains("where=Distrito+%3D+%27Faro%27"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod dataset;
pub mod query;
pub mod registry;
pub mod response;
mod view;

pub use dataset::{
    DatasetDescriptor, DatasetKey, FieldKind, FieldSpec, LogicalField, Projection,
    UnknownDatasetError, UnknownFieldError,
};
pub use query::{
    FilterPredicate, PageWindow, PageWindowError, ParseSortError, QueryBuilder, QueryError,
    SortField, SortOrder,
};
pub use registry::{ApiHost, HostMode, HostModeError, Registry, RegistryError};
pub use response::{
    AttributeValue, NormalizedResult, QueryEnvelope, Record, ResponseError, count,
    distinct_values, normalize, to_records,
};
pub use view::{AccommodationApi, RouteError, View};
