//! Test utilities for feature gateways.
//!
//! [`StubGateway`] is a deterministic [`FeatureGateway`] that returns a
//! pre-configured body or error and records every URL it was asked for.

use std::{
    future::Future,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::gateway::{FeatureGateway, GatewayError};

/// Stub `FeatureGateway` for testing.
///
/// # Example
///
/// ```
/// use roteiro_data::FeatureGateway;
/// use roteiro_data::test_support::{StubGateway, block_on_for_tests};
/// use serde_json::json;
/// use url::Url;
///
/// let gateway = StubGateway::with_body(json!({"count": 3}));
/// let url = Url::parse("https://example.org/query?f=json")?;
/// let body = block_on_for_tests(gateway.get(&url))?;
/// assert_eq!(body, json!({"count": 3}));
/// assert_eq!(gateway.requests(), [url]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct StubGateway {
    response: Result<Value, GatewayError>,
    requests: Mutex<Vec<Url>>,
}

impl StubGateway {
    /// Create a gateway that answers every request with `body`.
    #[must_use]
    pub const fn with_body(body: Value) -> Self {
        Self {
            response: Ok(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a gateway that fails every request with `error`.
    #[must_use]
    pub const fn with_error(error: GatewayError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<Url> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl FeatureGateway for StubGateway {
    async fn get(&self, url: &Url) -> Result<Value, GatewayError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());
        self.response.clone()
    }
}

/// Drive `future` to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics if the runtime cannot be built.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime should build")
        .block_on(future)
}
