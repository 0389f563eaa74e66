//! Resolution of the host that fronts the provider's ArcGIS services.
//!
//! Browsers cannot call the provider directly because it does not send
//! permissive CORS headers, so browser deployments route requests either
//! through a development reverse proxy or through a public CORS relay. Native
//! callers can skip both and talk to the provider directly.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public host of the provider's ArcGIS server.
pub const DEFAULT_PROVIDER: &str = "https://servergeo.sgeconomia.gov.pt";
/// Public CORS relay used by deployed browser builds.
pub const DEFAULT_RELAY: &str = "https://cors-anywhere.com";
/// Origin of the local development server.
pub const DEFAULT_PROXY_ORIGIN: &str = "http://localhost:5173";
/// Path prefix the development proxy strips before forwarding.
pub const PROXY_PREFIX: &str = "/api";

/// Which routing strategy to use when reaching the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    /// Local reverse proxy under [`PROXY_PREFIX`].
    Proxy,
    /// Public CORS relay in front of the provider.
    Relay,
    /// Provider host, unproxied.
    #[default]
    Direct,
}

impl HostMode {
    /// Mode a browser front end would pick for the page's `hostname`.
    ///
    /// # Examples
    /// ```
    /// use roteiro_core::HostMode;
    ///
    /// assert_eq!(HostMode::for_hostname("localhost"), HostMode::Proxy);
    /// assert_eq!(HostMode::for_hostname("example.github.io"), HostMode::Relay);
    /// ```
    #[must_use]
    pub fn for_hostname(hostname: &str) -> Self {
        if hostname == "localhost" {
            Self::Proxy
        } else {
            Self::Relay
        }
    }
}

impl fmt::Display for HostMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Proxy => "proxy",
            Self::Relay => "relay",
            Self::Direct => "direct",
        })
    }
}

impl FromStr for HostMode {
    type Err = HostModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "proxy" => Ok(Self::Proxy),
            "relay" => Ok(Self::Relay),
            "direct" => Ok(Self::Direct),
            _ => Err(HostModeError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Raised when a host mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown host mode `{value}` (expected proxy, relay or direct)")]
pub struct HostModeError {
    /// The rejected value.
    pub value: String,
}

/// Resolved base host for every dataset endpoint.
///
/// Build one at startup and hand it to
/// [`Registry::standard`](crate::Registry::standard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiHost {
    /// Development reverse proxy; requests go to `<origin>/api/...`.
    Proxy {
        /// Origin of the development server.
        origin: String,
    },
    /// CORS relay; requests go to `<relay>/<provider>/...`.
    Relay {
        /// Relay origin.
        relay: String,
        /// Provider origin appended to the relay path.
        provider: String,
    },
    /// Provider host with no intermediary.
    Direct {
        /// Provider origin.
        provider: String,
    },
}

impl Default for ApiHost {
    fn default() -> Self {
        Self::direct(DEFAULT_PROVIDER)
    }
}

impl ApiHost {
    /// Route through a development proxy at `origin`.
    #[must_use]
    pub fn proxy(origin: impl Into<String>) -> Self {
        Self::Proxy {
            origin: origin.into(),
        }
    }

    /// Route through `relay` in front of `provider`.
    #[must_use]
    pub fn relay(relay: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Relay {
            relay: relay.into(),
            provider: provider.into(),
        }
    }

    /// Talk to `provider` directly.
    #[must_use]
    pub fn direct(provider: impl Into<String>) -> Self {
        Self::Direct {
            provider: provider.into(),
        }
    }

    /// Build the host for `mode`, falling back to the public defaults for any
    /// origin not supplied.
    #[must_use]
    pub fn for_mode(
        mode: HostMode,
        proxy_origin: Option<String>,
        relay: Option<String>,
        provider: Option<String>,
    ) -> Self {
        let provider = provider.unwrap_or_else(|| DEFAULT_PROVIDER.to_owned());
        match mode {
            HostMode::Proxy => {
                Self::proxy(proxy_origin.unwrap_or_else(|| DEFAULT_PROXY_ORIGIN.to_owned()))
            }
            HostMode::Relay => {
                Self::relay(relay.unwrap_or_else(|| DEFAULT_RELAY.to_owned()), provider)
            }
            HostMode::Direct => Self::direct(provider),
        }
    }

    /// Mode this host was built for.
    #[must_use]
    pub const fn mode(&self) -> HostMode {
        match self {
            Self::Proxy { .. } => HostMode::Proxy,
            Self::Relay { .. } => HostMode::Relay,
            Self::Direct { .. } => HostMode::Direct,
        }
    }

    /// Base that service paths are appended to, without a trailing slash.
    ///
    /// # Examples
    /// ```
    /// use roteiro_core::ApiHost;
    ///
    /// let host = ApiHost::relay("https://relay.test/", "https://geo.test");
    /// assert_eq!(host.base(), "https://relay.test/https://geo.test");
    /// ```
    #[must_use]
    pub fn base(&self) -> String {
        match self {
            Self::Proxy { origin } => format!("{}{PROXY_PREFIX}", trim_origin(origin)),
            Self::Relay { relay, provider } => {
                format!("{}/{}", trim_origin(relay), trim_origin(provider))
            }
            Self::Direct { provider } => trim_origin(provider).to_owned(),
        }
    }
}

fn trim_origin(origin: &str) -> &str {
    origin.trim().trim_end_matches('/')
}
