//! `reqwest`-backed [`FeatureGateway`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::{FeatureGateway, GatewayBuildError, GatewayError};

/// Default user agent for query requests.
pub const DEFAULT_USER_AGENT: &str = "roteiro/0.1";

/// Configuration for [`HttpGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGatewayConfig {
    /// User agent string for requests.
    pub user_agent: String,
    /// Overall request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HttpGatewayConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: None,
        }
    }
}

impl HttpGatewayConfig {
    /// Configuration with the default user agent and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP gateway issuing one GET per query.
///
/// There is no retry, backoff or caching; failures surface as
/// [`GatewayError`] on the first attempt.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: HttpGatewayConfig,
}

impl HttpGateway {
    /// Create a gateway with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self, GatewayBuildError> {
        Self::with_config(HttpGatewayConfig::default())
    }

    /// Create a gateway with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpGatewayConfig) -> Result<Self, GatewayBuildError> {
        let builder = Client::builder().user_agent(&config.user_agent);
        let client = match config.timeout {
            Some(timeout) => builder.connect_timeout(timeout).timeout(timeout),
            None => builder,
        }
        .build()
        .map_err(GatewayBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// Configuration the gateway was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpGatewayConfig {
        &self.config
    }
}

#[async_trait]
impl FeatureGateway for HttpGateway {
    async fn get(&self, url: &Url) -> Result<Value, GatewayError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, url))?;
        debug!("{url} responded with {}", response.status());

        response.json::<Value>().await.map_err(|err| {
            if err.is_decode() {
                GatewayError::Decode {
                    url: url.to_string(),
                    message: err.to_string(),
                }
            } else {
                convert_reqwest_error(&err, url)
            }
        })
    }
}

/// Convert a reqwest error to a `GatewayError`.
fn convert_reqwest_error(error: &reqwest::Error, url: &Url) -> GatewayError {
    if error.is_timeout() {
        return GatewayError::Timeout {
            url: url.to_string(),
        };
    }

    if let Some(status) = error.status() {
        return GatewayError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        };
    }

    GatewayError::Network {
        url: url.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_defaults_have_no_timeout() {
        let config = HttpGatewayConfig::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout, None);
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpGatewayConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn gateway_keeps_its_config() {
        let config = HttpGatewayConfig::new().with_user_agent("roteiro-tests/0.0");
        let gateway = HttpGateway::with_config(config.clone()).expect("gateway should build");
        assert_eq!(gateway.config(), &config);
    }
}
