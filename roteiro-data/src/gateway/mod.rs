//! Transport seam between query URLs and raw JSON bodies.
//!
//! [`FeatureGateway`] is the only place the client touches the network.
//! [`HttpGateway`] implements it with `reqwest`; tests substitute
//! [`StubGateway`](crate::test_support::StubGateway).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use roteiro_data::{FeatureGateway, HttpGateway, HttpGatewayConfig};
//! use url::Url;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpGatewayConfig::new()
//!     .with_timeout(Duration::from_secs(20))
//!     .with_user_agent("my-app/1.0");
//! let gateway = HttpGateway::with_config(config)?;
//! let url = Url::parse("https://servergeo.sgeconomia.gov.pt/arcgis/rest/services/TDP/OpenData_AL/MapServer/6/query?where=1%3D1&returnCountOnly=true&f=json")?;
//! let body = gateway.get(&url).await?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

mod error;
mod http;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

pub use error::{GatewayBuildError, GatewayError};
pub use http::{DEFAULT_USER_AGENT, HttpGateway, HttpGatewayConfig};

/// Fetches the JSON body behind a fully-formed query URL.
///
/// Implementations issue exactly one request per call and never retry.
#[async_trait]
pub trait FeatureGateway: Send + Sync {
    /// Issue a GET for `url` and decode the body as JSON.
    async fn get(&self, url: &Url) -> Result<Value, GatewayError>;
}

#[async_trait]
impl<T: FeatureGateway + ?Sized> FeatureGateway for Box<T> {
    async fn get(&self, url: &Url) -> Result<Value, GatewayError> {
        (**self).get(url).await
    }
}

#[async_trait]
impl<T: FeatureGateway + ?Sized> FeatureGateway for Arc<T> {
    async fn get(&self, url: &Url) -> Result<Value, GatewayError> {
        (**self).get(url).await
    }
}
