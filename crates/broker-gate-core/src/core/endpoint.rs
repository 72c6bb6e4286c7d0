// crates/broker-gate-core/src/core/endpoint.rs
// ============================================================================
// Module: Broker Endpoints
// Description: Local and remote endpoint identities for broker connections.
// Purpose: Model directly-credentialed and gateway-proxied broker targets.
// Dependencies: serde, thiserror, url
// ============================================================================

//! ## Overview
//! An [`Endpoint`] identifies the broker a command acts on. A local endpoint
//! carries its own credentials and host; a remote endpoint is only a name
//! that the gateway resolves and authenticates per call. Exactly one endpoint
//! is current per command context, and switching replaces it wholesale.
//!
//! Security posture: passwords and access tokens are opaque secrets and are
//! redacted from `Debug` output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Endpoint construction errors.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The endpoint URL could not be parsed.
    #[error("invalid endpoint url {url}: {reason}")]
    InvalidUrl {
        /// Offending URL text.
        url: String,
        /// Parse failure detail.
        reason: String,
    },
}

// ============================================================================
// SECTION: Local Endpoint
// ============================================================================

/// A directly-credentialed broker connection owned by the calling session.
///
/// # Invariants
/// - `access_token` is empty until authentication succeeds, is set at most
///   once, and is reused for every subsequent call on this endpoint.
/// - Lookup identity is `broker_name`; all other fields are connection data.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalEndpoint {
    /// Display and lookup name for this endpoint.
    pub broker_name: String,
    /// User name presented to the broker's management endpoint.
    pub user_name: String,
    /// Opaque password; never logged.
    pub password: String,
    /// Management host name.
    pub host: String,
    /// URL scheme (`http` or `https`).
    pub scheme: String,
    /// Management port.
    pub port: u16,
    /// Opaque session token; empty until authenticated.
    pub access_token: String,
}

impl LocalEndpoint {
    /// Builds a local endpoint from a management URL and credentials.
    ///
    /// A URL without an explicit port defaults to 80 for `http` and 443
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::InvalidUrl`] when the URL cannot be parsed or
    /// lacks a host.
    pub fn from_url(
        broker_name: &str,
        endpoint_url: &str,
        user_name: &str,
        password: &str,
    ) -> Result<Self, EndpointError> {
        let url = Url::parse(endpoint_url).map_err(|err| EndpointError::InvalidUrl {
            url: endpoint_url.to_string(),
            reason: err.to_string(),
        })?;
        let host = url
            .host_str()
            .ok_or_else(|| EndpointError::InvalidUrl {
                url: endpoint_url.to_string(),
                reason: "missing host".to_string(),
            })?
            .to_string();
        let scheme = url.scheme().to_string();
        let port = url.port().unwrap_or(if scheme == "http" { 80 } else { 443 });
        Ok(Self {
            broker_name: broker_name.to_string(),
            user_name: user_name.to_string(),
            password: password.to_string(),
            host,
            scheme,
            port,
            access_token: String::new(),
        })
    }

    /// Renders the endpoint base URL as `scheme://host:port`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl std::fmt::Debug for LocalEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalEndpoint")
            .field("broker_name", &self.broker_name)
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("scheme", &self.scheme)
            .field("port", &self.port)
            .field("access_token", &if self.access_token.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

// ============================================================================
// SECTION: Remote Endpoint
// ============================================================================

/// A broker fronted by the gateway itself, identified only by name.
///
/// # Invariants
/// - The stored name keeps any leading `@` exactly as the user entered it;
///   path defaulting strips it when addressing the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    /// Gateway-registered endpoint name, including any leading `@`.
    pub endpoint_name: String,
}

impl RemoteEndpoint {
    /// Creates a remote endpoint from a user-entered name.
    #[must_use]
    pub fn new(endpoint_name: impl Into<String>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
        }
    }

    /// Returns the gateway-facing name with any leading `@` removed.
    #[must_use]
    pub fn stripped_name(&self) -> &str {
        self.endpoint_name.strip_prefix('@').unwrap_or(&self.endpoint_name)
    }
}

// ============================================================================
// SECTION: Endpoint
// ============================================================================

/// A named target broker connection, either local or gateway-proxied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Directly-credentialed local broker connection.
    Local(LocalEndpoint),
    /// Named endpoint proxied by the gateway.
    Remote(RemoteEndpoint),
}

impl Endpoint {
    /// Returns true when the gateway resolves this endpoint per call.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Returns the display/lookup name of this endpoint.
    #[must_use]
    pub fn broker_name(&self) -> &str {
        match self {
            Self::Local(local) => &local.broker_name,
            Self::Remote(remote) => &remote.endpoint_name,
        }
    }

    /// Renders the endpoint base URL; remote endpoints have no local URL.
    #[must_use]
    pub fn url(&self) -> String {
        match self {
            Self::Local(local) => local.url(),
            Self::Remote(_) => String::new(),
        }
    }
}
