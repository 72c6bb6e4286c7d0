// crates/broker-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Broker Gate Interfaces
// Description: Backend-agnostic access-client contract for broker management.
// Purpose: Define the network surface the dispatch engine depends on.
// Dependencies: crate::core, async-trait, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The dispatch engine never talks to the network directly; it is handed an
//! [`AccessClient`] that performs authentication, schema fetches, attribute
//! reads, and operation execution against the management API server. The
//! `target` parameter on read/invoke calls names a gateway-proxied endpoint;
//! `None` means the bound client's own endpoint is addressed directly.
//!
//! Security posture: tokens are opaque strings attached to requests and are
//! never inspected or logged by the core.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::component::ComponentKind;
use crate::core::endpoint::LocalEndpoint;
use crate::core::schema::Filter;
use crate::core::schema::OperationMap;
use crate::core::schema::OperationSignature;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Access client errors.
///
/// # Invariants
/// - Variants are stable for command error mapping and tests.
/// - String payloads may include untrusted server text.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client configuration error.
    #[error("access client config error: {0}")]
    Config(String),
    /// Transport-level failure before a status was received.
    #[error("transport error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("http status {status}: {status_text}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// HTTP status text.
        status_text: String,
        /// Body preview for diagnostics.
        body: String,
    },
    /// JSON encoding or decoding failure.
    #[error("json error: {0}")]
    Json(String),
    /// The server response violated the management API contract.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// Authentication was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// Response size exceeds limits.
    #[error("response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Actual size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Request Types
// ============================================================================

/// Addressing and selection data for attribute and schema reads.
///
/// Queues additionally need their address and routing type; other component
/// kinds leave those unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRequest {
    /// Component name; `None` addresses the broker root.
    pub name: Option<String>,
    /// Owning address name (queues only).
    pub address: Option<String>,
    /// Routing type (queues only).
    pub routing_type: Option<String>,
    /// Attribute name selection.
    pub attrs: Filter,
}

/// A gateway-registered endpoint listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointListing {
    /// Registered endpoint name.
    pub name: String,
    /// Endpoint URL as reported by the gateway.
    pub url: String,
}

// ============================================================================
// SECTION: Access Client
// ============================================================================

/// Backend-agnostic management API client.
#[async_trait]
pub trait AccessClient: Send + Sync {
    /// Probes the management API server for availability.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the probe request cannot be made.
    async fn check_api_server(&self) -> Result<bool, ClientError>;

    /// Logs in to the API server itself and retains the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] when the server rejects the credentials.
    async fn server_login(&self, user: &str, password: &str) -> Result<(), ClientError>;

    /// Authenticates a local endpoint and returns its opaque session token.
    ///
    /// Implementations attach the token to subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] when the endpoint rejects the login.
    async fn authenticate(&self, endpoint: &LocalEndpoint) -> Result<String, ClientError>;

    /// Reads the broker root descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request or decoding fails.
    async fn read_broker(&self, target: Option<&str>) -> Result<Value, ClientError>;

    /// Enumerates every component kind of the broker.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request or decoding fails.
    async fn read_broker_components(&self, target: Option<&str>) -> Result<Value, ClientError>;

    /// Lists all components of one kind.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request or decoding fails.
    async fn read_components(
        &self,
        kind: ComponentKind,
        target: Option<&str>,
    ) -> Result<Value, ClientError>;

    /// Reads attributes of one component per the request's selection.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request or decoding fails.
    async fn read_attributes(
        &self,
        kind: ComponentKind,
        request: &AttributeRequest,
        target: Option<&str>,
    ) -> Result<Value, ClientError>;

    /// Fetches a component's operation schemas, filtered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request or decoding fails.
    async fn read_operations(
        &self,
        kind: ComponentKind,
        request: &AttributeRequest,
        names: &Filter,
        target: Option<&str>,
    ) -> Result<OperationMap, ClientError>;

    /// Executes a resolved operation against one component.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request or decoding fails.
    async fn invoke_operation(
        &self,
        kind: ComponentKind,
        name: Option<&str>,
        signature: &OperationSignature,
        target: Option<&str>,
    ) -> Result<Value, ClientError>;

    /// Lists every endpoint the gateway can proxy directly.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request or decoding fails.
    async fn list_proxied_endpoints(&self) -> Result<Vec<EndpointListing>, ClientError>;
}
