//! Error types produced by feature gateways.

use thiserror::Error;

/// Errors raised while fetching a query URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// The request never produced a response.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// Transport error message.
        message: String,
    },
    /// The configured timeout elapsed.
    #[error("request to {url} timed out")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
    },
    /// The body was not valid JSON.
    #[error("response from {url} is not valid JSON: {message}")]
    Decode {
        /// Fully qualified request URL.
        url: String,
        /// Decoder message.
        message: String,
    },
}

impl GatewayError {
    /// HTTP status for [`GatewayError::Http`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Request URL the error refers to.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. }
            | Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::Decode { url, .. } => url,
        }
    }
}

/// Error type for [`HttpGateway`](super::HttpGateway) construction failures.
#[derive(Debug)]
pub enum GatewayBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
}

impl std::fmt::Display for GatewayBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for GatewayBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
        }
    }
}
