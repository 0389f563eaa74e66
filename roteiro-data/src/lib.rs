//! Network access for the Roteiro open-data client.
//!
//! [`HttpGateway`] issues ArcGIS query URLs built by
//! [`roteiro_core::QueryBuilder`] and returns raw JSON bodies.
//! [`TourismClient`] ties the registry, builder, gateway and normalizer
//! together so each operation is a single awaited call.

#![forbid(unsafe_code)]

mod client;
pub mod gateway;

#[doc(hidden)]
pub mod test_support;

pub use client::{ClientBuildError, ClientError, TourismClient};
pub use gateway::{
    DEFAULT_USER_AGENT, FeatureGateway, GatewayBuildError, GatewayError, HttpGateway,
    HttpGatewayConfig,
};
