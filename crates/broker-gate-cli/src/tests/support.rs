// crates/broker-gate-cli/src/tests/support.rs
// ============================================================================
// Module: Test Support
// Description: Recording access client for command-surface tests.
// Purpose: Capture backend calls and return canned fixtures.
// Dependencies: async-trait, broker-gate-core, serde_json
// ============================================================================

//! ## Overview
//! [`RecordingClient`] implements the access-client contract with canned
//! fixtures and records every call so tests can assert exactly what a
//! command line produced on the wire.

use std::sync::Mutex;

use async_trait::async_trait;
use broker_gate_core::AccessClient;
use broker_gate_core::AttributeRequest;
use broker_gate_core::ClientError;
use broker_gate_core::ComponentKind;
use broker_gate_core::EndpointListing;
use broker_gate_core::Filter;
use broker_gate_core::LocalEndpoint;
use broker_gate_core::OperationMap;
use broker_gate_core::OperationSignature;
use broker_gate_core::filter_operations;
use serde_json::Value;
use serde_json::json;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    /// Gateway login.
    ServerLogin {
        /// Login user name.
        user: String,
    },
    /// Endpoint login.
    Authenticate {
        /// Endpoint name presented at login.
        broker_name: String,
    },
    /// Broker root read.
    ReadBroker {
        /// Remote target, if any.
        target: Option<String>,
    },
    /// Full component enumeration read.
    ReadBrokerComponents {
        /// Remote target, if any.
        target: Option<String>,
    },
    /// Component listing read.
    ReadComponents {
        /// Component kind.
        kind: ComponentKind,
        /// Remote target, if any.
        target: Option<String>,
    },
    /// Attribute read.
    ReadAttributes {
        /// Component kind.
        kind: ComponentKind,
        /// Addressing and selection.
        request: AttributeRequest,
        /// Remote target, if any.
        target: Option<String>,
    },
    /// Operation schema fetch.
    ReadOperations {
        /// Component kind.
        kind: ComponentKind,
        /// Addressing data.
        request: AttributeRequest,
        /// Operation name selection.
        names: Filter,
        /// Remote target, if any.
        target: Option<String>,
    },
    /// Operation execution.
    Invoke {
        /// Component kind.
        kind: ComponentKind,
        /// Component name parameter, if any.
        name: Option<String>,
        /// Resolved invocation payload.
        signature: OperationSignature,
        /// Remote target, if any.
        target: Option<String>,
    },
    /// Gateway endpoint enumeration.
    ListEndpoints,
}

/// Access client that records calls and serves canned fixtures.
pub(crate) struct RecordingClient {
    /// Calls in invocation order.
    calls: Mutex<Vec<Call>>,
    /// Operation map served by schema fetches (before filtering).
    operations: OperationMap,
    /// Listing value served by component reads.
    components: Value,
    /// Gateway endpoints served by `list_proxied_endpoints`.
    listings: Vec<EndpointListing>,
}

impl RecordingClient {
    /// Creates a client with empty fixtures.
    pub(crate) fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            operations: OperationMap::new(),
            components: json!([]),
            listings: Vec::new(),
        }
    }

    /// Replaces the operation-map fixture.
    pub(crate) fn with_operations(mut self, operations: OperationMap) -> Self {
        self.operations = operations;
        self
    }

    /// Replaces the component-listing fixture.
    pub(crate) fn with_components(mut self, components: Value) -> Self {
        self.components = components;
        self
    }

    /// Replaces the gateway endpoint fixture.
    pub(crate) fn with_listings(mut self, listings: Vec<EndpointListing>) -> Self {
        self.listings = listings;
        self
    }

    /// Returns the recorded calls so far.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Appends one recorded call.
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AccessClient for RecordingClient {
    async fn check_api_server(&self) -> Result<bool, ClientError> {
        Ok(true)
    }

    async fn server_login(&self, user: &str, _password: &str) -> Result<(), ClientError> {
        self.record(Call::ServerLogin {
            user: user.to_string(),
        });
        Ok(())
    }

    async fn authenticate(&self, endpoint: &LocalEndpoint) -> Result<String, ClientError> {
        self.record(Call::Authenticate {
            broker_name: endpoint.broker_name.clone(),
        });
        Ok("session-token".to_string())
    }

    async fn read_broker(&self, target: Option<&str>) -> Result<Value, ClientError> {
        self.record(Call::ReadBroker {
            target: target.map(ToString::to_string),
        });
        Ok(self.components.clone())
    }

    async fn read_broker_components(&self, target: Option<&str>) -> Result<Value, ClientError> {
        self.record(Call::ReadBrokerComponents {
            target: target.map(ToString::to_string),
        });
        Ok(self.components.clone())
    }

    async fn read_components(
        &self,
        kind: ComponentKind,
        target: Option<&str>,
    ) -> Result<Value, ClientError> {
        self.record(Call::ReadComponents {
            kind,
            target: target.map(ToString::to_string),
        });
        Ok(self.components.clone())
    }

    async fn read_attributes(
        &self,
        kind: ComponentKind,
        request: &AttributeRequest,
        target: Option<&str>,
    ) -> Result<Value, ClientError> {
        self.record(Call::ReadAttributes {
            kind,
            request: request.clone(),
            target: target.map(ToString::to_string),
        });
        Ok(json!({}))
    }

    async fn read_operations(
        &self,
        kind: ComponentKind,
        request: &AttributeRequest,
        names: &Filter,
        target: Option<&str>,
    ) -> Result<OperationMap, ClientError> {
        self.record(Call::ReadOperations {
            kind,
            request: request.clone(),
            names: names.clone(),
            target: target.map(ToString::to_string),
        });
        Ok(filter_operations(self.operations.clone(), names))
    }

    async fn invoke_operation(
        &self,
        kind: ComponentKind,
        name: Option<&str>,
        signature: &OperationSignature,
        target: Option<&str>,
    ) -> Result<Value, ClientError> {
        self.record(Call::Invoke {
            kind,
            name: name.map(ToString::to_string),
            signature: signature.clone(),
            target: target.map(ToString::to_string),
        });
        Ok(json!("ok"))
    }

    async fn list_proxied_endpoints(&self) -> Result<Vec<EndpointListing>, ClientError> {
        self.record(Call::ListEndpoints);
        Ok(self.listings.clone())
    }
}
