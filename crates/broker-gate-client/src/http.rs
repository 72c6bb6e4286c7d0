// crates/broker-gate-client/src/http.rs
// ============================================================================
// Module: HTTP Access Client
// Description: Reqwest-backed management API client with strict limits.
// Purpose: Implement the access-client contract over the api/v1 surface.
// Dependencies: broker-gate-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`HttpAccessClient`] maps every access-client call onto one management API
//! route under `api/v1/`. Gateway bearer tokens and per-endpoint session
//! tokens are held behind a mutex and attached to every subsequent request.
//! Remote targets travel as a `targetEndpoint` query parameter. Responses are
//! read in bounded chunks and non-success statuses fail closed with the
//! status line and a body preview.
//!
//! Security posture: server responses are untrusted; credentials are sent
//! only in request bodies and never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::time::Duration;

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
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::redirect::Policy;
use serde_json::Value;
use serde_json::json;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default management API server base URL.
const DEFAULT_BASE_URL: &str = "https://localhost:9443";
/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default hard limit on response body size in bytes.
const DEFAULT_MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;
/// Maximum body bytes echoed back in error diagnostics.
const BODY_PREVIEW_BYTES: usize = 2048;
/// Request header carrying the per-endpoint session token.
const SESSION_HEADER: &str = "jolokia-session-id";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Connection settings for the HTTP access client.
///
/// # Invariants
/// - `max_response_bytes` is enforced as a hard upper bound on bodies.
/// - `tls_insecure = true` disables certificate verification and must be an
///   explicit operator decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Management API server base URL (without the `api/v1` suffix).
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Skip TLS certificate verification when true.
    pub tls_insecure: bool,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            tls_insecure: false,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Session State
// ============================================================================

/// Tokens attached to outbound requests once acquired.
#[derive(Debug, Default)]
struct SessionHeaders {
    /// Gateway bearer token from `server/login`.
    bearer: Option<String>,
    /// Per-endpoint session token from `jolokia/login`.
    session: Option<String>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Reqwest-backed implementation of the access-client contract.
///
/// # Invariants
/// - Redirects are never followed.
/// - Every response body is capped at the configured size limit.
/// - Acquired tokens are attached to all subsequent requests.
pub struct HttpAccessClient {
    /// API root, always ending in `api/v1/`.
    base: Url,
    /// Shared HTTP client with timeout and redirect policy applied.
    client: Client,
    /// Hard response-size limit in bytes.
    max_response_bytes: usize,
    /// Acquired bearer and session tokens.
    headers: Mutex<SessionHeaders>,
}

impl HttpAccessClient {
    /// Creates a client against the configured management API server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &HttpClientConfig) -> Result<Self, ClientError> {
        let trimmed = config.base_url.trim_end_matches('/');
        let base = Url::parse(&format!("{trimmed}/api/v1/"))
            .map_err(|err| ClientError::Config(format!("invalid api server url: {err}")))?;
        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::none());
        if config.tls_insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|err| ClientError::Config(format!("http client build failed: {err}")))?;
        Ok(Self {
            base,
            client,
            max_response_bytes: config.max_response_bytes,
            headers: Mutex::new(SessionHeaders::default()),
        })
    }

    /// Resolves a route path against the API root.
    fn route(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|err| ClientError::Config(format!("invalid route {path}: {err}")))
    }

    /// Snapshots the current token headers.
    fn header_snapshot(&self) -> Result<(Option<String>, Option<String>), ClientError> {
        let headers = self
            .headers
            .lock()
            .map_err(|_| ClientError::Config("session header lock poisoned".to_string()))?;
        Ok((headers.bearer.clone(), headers.session.clone()))
    }

    /// Stores the gateway bearer token for subsequent requests.
    fn store_bearer(&self, token: String) -> Result<(), ClientError> {
        let mut headers = self
            .headers
            .lock()
            .map_err(|_| ClientError::Config("session header lock poisoned".to_string()))?;
        headers.bearer = Some(token);
        Ok(())
    }

    /// Stores the per-endpoint session token for subsequent requests.
    fn store_session(&self, token: String) -> Result<(), ClientError> {
        let mut headers = self
            .headers
            .lock()
            .map_err(|_| ClientError::Config("session header lock poisoned".to_string()))?;
        headers.session = Some(token);
        Ok(())
    }

    /// Attaches acquired tokens to an outbound request.
    fn apply_headers(&self, mut request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let (bearer, session) = self.header_snapshot()?;
        if let Some(token) = bearer {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(token) = session {
            request = request.header(SESSION_HEADER, token);
        }
        Ok(request)
    }

    /// Sends a GET request and decodes the JSON response.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ClientError> {
        let url = self.route(path)?;
        let request = self.apply_headers(self.client.get(url))?.query(query);
        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        self.decode_json(response).await
    }

    /// Sends a POST request with a JSON body and decodes the JSON response.
    async fn post_json(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &Value,
    ) -> Result<Value, ClientError> {
        let url = self.route(path)?;
        let request = self.apply_headers(self.client.post(url))?.query(query).json(body);
        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        self.decode_json(response).await
    }

    /// Checks the status line and reads the bounded JSON body.
    async fn decode_json(&self, response: Response) -> Result<Value, ClientError> {
        let status = response.status();
        let body = self.read_limited(response).await?;
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body: body_preview(&body),
            });
        }
        serde_json::from_slice(&body).map_err(|err| ClientError::Json(err.to_string()))
    }

    /// Reads the response body while enforcing the size limit.
    async fn read_limited(&self, mut response: Response) -> Result<Vec<u8>, ClientError> {
        let limit_u64 = u64::try_from(self.max_response_bytes)
            .map_err(|_| ClientError::Config("response size limit exceeds u64".to_string()))?;
        if let Some(expected) = response.content_length()
            && expected > limit_u64
        {
            return Err(ClientError::ResponseTooLarge {
                actual: usize::try_from(expected).unwrap_or(usize::MAX),
                limit: self.max_response_bytes,
            });
        }
        let mut body = Vec::new();
        while let Some(chunk) =
            response.chunk().await.map_err(|err| ClientError::Transport(err.to_string()))?
        {
            if body.len().saturating_add(chunk.len()) > self.max_response_bytes {
                return Err(ClientError::ResponseTooLarge {
                    actual: body.len().saturating_add(chunk.len()),
                    limit: self.max_response_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

// ============================================================================
// SECTION: Route Tables
// ============================================================================

/// Listing route for one component kind.
const fn list_route(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Broker => "brokers",
        ComponentKind::Queue => "queues",
        ComponentKind::Address => "addresses",
        ComponentKind::Acceptor => "acceptors",
        ComponentKind::ClusterConnection => "clusterConnections",
    }
}

/// Component-descriptor route for one component kind.
const fn details_route(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Broker => "brokerDetails",
        ComponentKind::Queue => "queueDetails",
        ComponentKind::Address => "addressDetails",
        ComponentKind::Acceptor => "acceptorDetails",
        ComponentKind::ClusterConnection => "clusterConnectionDetails",
    }
}

/// Attribute-read route for one component kind.
const fn attributes_route(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Broker => "readBrokerAttributes",
        ComponentKind::Queue => "readQueueAttributes",
        ComponentKind::Address => "readAddressAttributes",
        ComponentKind::Acceptor => "readAcceptorAttributes",
        ComponentKind::ClusterConnection => "readClusterConnectionAttributes",
    }
}

/// Operation-execution route for one component kind.
const fn exec_route(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Broker => "execBrokerOperation",
        ComponentKind::Queue => "execQueueOperation",
        ComponentKind::Address => "execAddressOperation",
        ComponentKind::Acceptor => "execAcceptorOperation",
        ComponentKind::ClusterConnection => "execClusterConnectionOperation",
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends the remote-target indirection parameter when present.
fn push_target(query: &mut Vec<(&'static str, String)>, target: Option<&str>) {
    if let Some(target) = target {
        query.push(("targetEndpoint", target.to_string()));
    }
}

/// Appends one repeated query parameter per filtered name.
fn push_names(query: &mut Vec<(&'static str, String)>, key: &'static str, filter: &Filter) {
    if let Filter::Names(names) = filter {
        for name in names {
            query.push((key, name.clone()));
        }
    }
}

/// Truncates a response body to a printable diagnostic preview.
fn body_preview(body: &[u8]) -> String {
    let end = body.len().min(BODY_PREVIEW_BYTES);
    String::from_utf8_lossy(&body[..end]).into_owned()
}

/// Extracts a string field from a JSON object, or empty.
fn string_field(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).unwrap_or("").to_string()
}

// ============================================================================
// SECTION: AccessClient Implementation
// ============================================================================

#[async_trait]
impl AccessClient for HttpAccessClient {
    async fn check_api_server(&self) -> Result<bool, ClientError> {
        match self.get_json("api-info", &[]).await {
            Ok(info) => Ok(string_field(&info, "status") == "successful"),
            Err(_) => Ok(false),
        }
    }

    async fn server_login(&self, user: &str, password: &str) -> Result<(), ClientError> {
        let body = json!({
            "userName": user,
            "password": password,
        });
        let response = self.post_json("server/login", &[], &body).await?;
        if string_field(&response, "status") != "success" {
            return Err(ClientError::Auth(string_field(&response, "message")));
        }
        let bearer = string_field(&response, "bearerToken");
        if !bearer.is_empty() {
            self.store_bearer(bearer)?;
        }
        Ok(())
    }

    async fn authenticate(&self, endpoint: &LocalEndpoint) -> Result<String, ClientError> {
        let body = json!({
            "brokerName": endpoint.broker_name,
            "userName": endpoint.user_name,
            "password": endpoint.password,
            "jolokiaHost": endpoint.host,
            "scheme": endpoint.scheme,
            "port": endpoint.port.to_string(),
        });
        let response = self.post_json("jolokia/login", &[], &body).await?;
        if string_field(&response, "status") != "success" {
            return Err(ClientError::Auth(string_field(&response, "message")));
        }
        let token = string_field(&response, SESSION_HEADER);
        if token.is_empty() {
            return Err(ClientError::Protocol("login response carries no session token".to_string()));
        }
        self.store_session(token.clone())?;
        Ok(token)
    }

    async fn read_broker(&self, target: Option<&str>) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_target(&mut query, target);
        self.get_json("brokers", &query).await
    }

    async fn read_broker_components(&self, target: Option<&str>) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_target(&mut query, target);
        self.get_json("brokerComponents", &query).await
    }

    async fn read_components(
        &self,
        kind: ComponentKind,
        target: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        push_target(&mut query, target);
        self.get_json(list_route(kind), &query).await
    }

    async fn read_attributes(
        &self,
        kind: ComponentKind,
        request: &AttributeRequest,
        target: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        if let Some(name) = &request.name {
            query.push(("name", name.clone()));
        }
        if kind == ComponentKind::Queue {
            if let Some(address) = &request.address {
                query.push(("address", address.clone()));
            }
            if let Some(routing_type) = &request.routing_type {
                query.push(("routing-type", routing_type.clone()));
            }
        }
        // The broker route names its selection parameter differently.
        let key = if kind == ComponentKind::Broker { "names" } else { "attrs" };
        push_names(&mut query, key, &request.attrs);
        push_target(&mut query, target);
        self.get_json(attributes_route(kind), &query).await
    }

    async fn read_operations(
        &self,
        kind: ComponentKind,
        request: &AttributeRequest,
        names: &Filter,
        target: Option<&str>,
    ) -> Result<OperationMap, ClientError> {
        let mut query = Vec::new();
        if let Some(name) = &request.name {
            query.push(("name", name.clone()));
        }
        if kind == ComponentKind::Queue {
            if let Some(address) = &request.address {
                query.push(("addressName", address.clone()));
            }
            if let Some(routing_type) = &request.routing_type {
                query.push(("routingType", routing_type.clone()));
            }
        }
        push_target(&mut query, target);
        let details = self.get_json(details_route(kind), &query).await?;
        let operations = details
            .get("op")
            .cloned()
            .ok_or_else(|| ClientError::Protocol("component descriptor has no op map".to_string()))?;
        let operations: OperationMap = serde_json::from_value(operations)
            .map_err(|err| ClientError::Json(err.to_string()))?;
        Ok(filter_operations(operations, names))
    }

    async fn invoke_operation(
        &self,
        kind: ComponentKind,
        name: Option<&str>,
        signature: &OperationSignature,
        target: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut query = Vec::new();
        if let Some(name) = name {
            query.push(("name", name.to_string()));
        }
        push_target(&mut query, target);
        let body = json!({
            "signature": signature,
        });
        self.post_json(exec_route(kind), &query, &body).await
    }

    async fn list_proxied_endpoints(&self) -> Result<Vec<EndpointListing>, ClientError> {
        let listing = self.get_json("admin/listEndpoints", &[]).await?;
        serde_json::from_value(listing).map_err(|err| ClientError::Json(err.to_string()))
    }
}
