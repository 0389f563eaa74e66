//! Facade crate for the Roteiro tourism open-data client.
//!
//! This crate re-exports the query, registry and response types and, with the
//! `http` feature, the network client.

#![forbid(unsafe_code)]

pub use roteiro_core::{
    AccommodationApi, ApiHost, AttributeValue, DatasetDescriptor, DatasetKey, FilterPredicate,
    HostMode, LogicalField, NormalizedResult, PageWindow, QueryBuilder, QueryError, Record,
    Registry, ResponseError, RouteError, SortField, SortOrder, View,
};

#[cfg(feature = "http")]
pub use roteiro_data::{
    ClientBuildError, ClientError, FeatureGateway, GatewayError, HttpGateway, HttpGatewayConfig,
    TourismClient,
};
