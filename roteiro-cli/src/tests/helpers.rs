//! Test helpers for building query configurations and capturing output.

use super::*;
use crate::query::{GatewayFactory, QueryConfig};
use roteiro_data::test_support::StubGateway;
use roteiro_data::{FeatureGateway, HttpGatewayConfig};
use std::sync::Arc;

/// Hands out a shared [`StubGateway`] so tests can inspect its requests.
pub(super) struct StubGatewayFactory {
    gateway: Arc<StubGateway>,
}

impl StubGatewayFactory {
    pub(super) fn new(gateway: StubGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    pub(super) fn gateway(&self) -> &StubGateway {
        &self.gateway
    }
}

impl GatewayFactory for StubGatewayFactory {
    fn build(&self, _config: &HttpGatewayConfig) -> Result<Box<dyn FeatureGateway>, CliError> {
        Ok(Box::new(Arc::clone(&self.gateway)))
    }
}

/// Arguments naming `dataset` and nothing else.
pub(super) fn args_for(dataset: &str) -> QueryArgs {
    QueryArgs {
        dataset: Some(dataset.to_owned()),
        ..QueryArgs::default()
    }
}

/// Resolve `args` for `kind`, panicking on failure.
pub(super) fn config_for(kind: QueryKind, args: QueryArgs) -> QueryConfig {
    QueryConfig::try_from((kind, args)).expect("configuration should resolve")
}

/// Decode captured stdout as JSON.
pub(super) fn json_output(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("output should be JSON")
}
