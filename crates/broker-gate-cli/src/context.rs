// crates/broker-gate-cli/src/context.rs
// ============================================================================
// Module: Command Context
// Description: The get/run command surface bound to one endpoint.
// Purpose: Dispatch target paths onto access-client reads and invocations.
// Dependencies: broker-gate-core, clap, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! A [`CommandContext`] holds the shared access client and at most one
//! current endpoint, and executes the two stateless commands `get` and `run`.
//! `get` resolves a target path and reads listings, attributes, or operation
//! schemas; `run` parses an `operation(args)` invocation, fetches the
//! operation's schemas, resolves the unique overload, and executes it.
//! Every command returns status `0` or `1` and never propagates an error
//! past the command boundary; failures print a `{message, details}` block.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use broker_gate_core::AccessClient;
use broker_gate_core::AttributeRequest;
use broker_gate_core::ClientError;
use broker_gate_core::ComponentKind;
use broker_gate_core::ComponentKindError;
use broker_gate_core::Endpoint;
use broker_gate_core::EndpointError;
use broker_gate_core::Filter;
use broker_gate_core::LocalEndpoint;
use broker_gate_core::OperationSignature;
use broker_gate_core::OverloadError;
use broker_gate_core::PathError;
use broker_gate_core::normalize;
use broker_gate_core::resolve_overload;
use broker_gate_core::resolve_target;
use broker_gate_core::split_args;
use clap::Parser;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::output::client_error_details;
use crate::output::print_error;
use crate::output::print_result;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status returned by a command that completed.
pub(crate) const STATUS_OK: u8 = 0;
/// Status returned by a command that failed.
pub(crate) const STATUS_FAILED: u8 = 1;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Command execution errors surfaced at the command boundary.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    /// An endpoint URL could not be parsed.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    /// The target path expression is malformed.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The component type alias is not supported.
    #[error(transparent)]
    Kind(#[from] ComponentKindError),
    /// A network or protocol failure from the access client.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// No unique operation overload matched the arguments.
    #[error(transparent)]
    Overload(#[from] OverloadError),
    /// The command arguments are inconsistent with the target.
    #[error("{0}")]
    Usage(String),
    /// The operation invocation does not parse as `name(args)`.
    #[error("Invalid command")]
    InvalidCommand,
}

/// Renders a command failure into an error-details value.
pub(crate) fn command_error_details(err: &CommandError) -> Value {
    match err {
        CommandError::Client(client_err) => client_error_details(client_err),
        other => Value::String(other.to_string()),
    }
}

// ============================================================================
// SECTION: Command Arguments
// ============================================================================

/// Arguments of the `get` command.
#[derive(Debug, Parser)]
#[command(name = "get", about = "get information from an endpoint", disable_version_flag = true)]
struct GetArgs {
    /// Target path `[[@]endpointName/]componentType`; `@` means a gateway
    /// endpoint.
    path: String,
    /// Component name; empty selects every component of the type.
    #[arg(default_value = "")]
    comp_name: String,
    /// Attribute names to read; `*` reads all.
    #[arg(short = 'a', long = "attributes", num_args = 1..)]
    attributes: Vec<String>,
    /// Operation names to describe; `*` describes all.
    #[arg(short = 'o', long = "operations", num_args = 1..)]
    operations: Vec<String>,
}

/// Arguments of the `run` command.
#[derive(Debug, Parser)]
#[command(
    name = "run",
    about = "invoke a remote operation on a component of an endpoint",
    disable_version_flag = true
)]
struct RunArgs {
    /// Target path `[[@]endpointName/]componentType`; `@` means a gateway
    /// endpoint.
    path: String,
    /// Optional component name followed by `operationName(args...)`; tokens
    /// are rejoined to tolerate embedded whitespace.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 1..)]
    invocation: Vec<String>,
}

/// A parsed `[compName] operationName(argString)` invocation.
#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    /// Component name; empty means the path's type carries the target.
    comp_name: String,
    /// Operation name.
    operation: String,
    /// Raw comma-separated argument string, still normalized.
    arg_str: String,
}

/// Returns true for characters allowed in component names.
const fn is_component_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Parses a normalized invocation of the form `[compName] name(args)`.
fn parse_invocation(raw: &str) -> Result<Invocation, CommandError> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_suffix(')').ok_or(CommandError::InvalidCommand)?;
    let open = stripped.find('(').ok_or(CommandError::InvalidCommand)?;
    let head = &stripped[..open];
    let arg_str = &stripped[open + 1..];

    let mut tokens = head.split_whitespace();
    let (comp_name, operation) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(operation), None, None) => (String::new(), operation),
        (Some(comp_name), Some(operation), None) => (comp_name.to_string(), operation),
        _ => return Err(CommandError::InvalidCommand),
    };
    if operation.is_empty() || !operation.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CommandError::InvalidCommand);
    }
    if !comp_name.chars().all(is_component_char) {
        return Err(CommandError::InvalidCommand);
    }
    Ok(Invocation {
        comp_name,
        operation: operation.to_string(),
        arg_str: arg_str.to_string(),
    })
}

// ============================================================================
// SECTION: Labels
// ============================================================================

/// Plural display label used in listing failure messages.
const fn kind_plural(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Broker => "brokers",
        ComponentKind::Queue => "queues",
        ComponentKind::Address => "addresses",
        ComponentKind::Acceptor => "acceptors",
        ComponentKind::ClusterConnection => "cluster connections",
    }
}

/// Singular display label used in read failure messages.
const fn kind_label(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Broker => "broker",
        ComponentKind::Queue => "queue",
        ComponentKind::Address => "address",
        ComponentKind::Acceptor => "acceptor",
        ComponentKind::ClusterConnection => "cluster connection",
    }
}

// ============================================================================
// SECTION: Command Context
// ============================================================================

/// One endpoint binding plus the shared access client.
///
/// # Invariants
/// - At most one endpoint is current; switching replaces it wholesale.
/// - Commands never panic or propagate errors past the boundary.
#[derive(Clone)]
pub(crate) struct CommandContext {
    /// Shared management API client.
    client: Arc<dyn AccessClient>,
    /// Currently bound endpoint, if any.
    endpoint: Option<Endpoint>,
}

impl CommandContext {
    /// Creates a context bound to an optional endpoint.
    pub(crate) const fn new(client: Arc<dyn AccessClient>, endpoint: Option<Endpoint>) -> Self {
        Self {
            client,
            endpoint,
        }
    }

    /// Creates a context named `current` from an endpoint URL.
    ///
    /// Credentials embedded in the URL userinfo become the login identity.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Endpoint`] when the URL cannot be parsed.
    pub(crate) fn from_endpoint_url(
        client: Arc<dyn AccessClient>,
        endpoint_url: &str,
    ) -> Result<Self, CommandError> {
        let url = Url::parse(endpoint_url).map_err(|err| EndpointError::InvalidUrl {
            url: endpoint_url.to_string(),
            reason: err.to_string(),
        })?;
        let user_name = url.username().to_string();
        let password = url.password().unwrap_or("").to_string();
        let local = LocalEndpoint::from_url("current", endpoint_url, &user_name, &password)?;
        Ok(Self {
            client,
            endpoint: Some(Endpoint::Local(local)),
        })
    }

    /// Returns the shared access client.
    pub(crate) fn client(&self) -> Arc<dyn AccessClient> {
        Arc::clone(&self.client)
    }

    /// Returns the currently bound endpoint.
    pub(crate) const fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Replaces the currently bound endpoint.
    pub(crate) fn set_endpoint(&mut self, endpoint: Endpoint) {
        self.endpoint = Some(endpoint);
    }

    /// Adopts another context's client and endpoint, switching wholesale.
    pub(crate) fn adopt(&mut self, target: &Self) {
        self.client = Arc::clone(&target.client);
        self.endpoint = target.endpoint.clone();
    }

    /// Authenticates the bound local endpoint once, retaining its token.
    ///
    /// Remote and absent endpoints need no login; an already-authenticated
    /// endpoint is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Client`] when the endpoint rejects the login.
    pub(crate) async fn login(&mut self) -> Result<(), CommandError> {
        let Some(Endpoint::Local(local)) = self.endpoint.as_mut() else {
            return Ok(());
        };
        if !local.access_token.is_empty() {
            return Ok(());
        }
        let token = self.client.authenticate(local).await?;
        local.access_token = token;
        Ok(())
    }

    /// Executes one `get` or `run` command and returns its status.
    ///
    /// A single-element argument list is treated as a quoted command line and
    /// split on single spaces, so runs of spaces inside argument literals
    /// survive the later rejoin.
    pub(crate) async fn process_command(&self, args: &[String]) -> u8 {
        let resolved: Vec<String> = if args.len() == 1 {
            args[0].trim().split(' ').map(ToString::to_string).collect()
        } else {
            args.to_vec()
        };
        match resolved.first().map(String::as_str) {
            Some("get") => match GetArgs::try_parse_from(&resolved) {
                Ok(get) => match self.execute_get(&get).await {
                    Ok(status) => status,
                    Err(err) => {
                        print_error(
                            "failed to execute get command",
                            Some(command_error_details(&err)),
                        );
                        STATUS_FAILED
                    }
                },
                Err(err) => {
                    print_error(
                        "failed to execute get command",
                        Some(Value::String(err.to_string())),
                    );
                    STATUS_FAILED
                }
            },
            Some("run") => match RunArgs::try_parse_from(&resolved) {
                Ok(run) => match self.execute_run(&run).await {
                    Ok(status) => status,
                    Err(err) => {
                        print_error(
                            "failed to execute run command",
                            Some(command_error_details(&err)),
                        );
                        STATUS_FAILED
                    }
                },
                Err(err) => {
                    print_error(
                        "failed to execute run command",
                        Some(Value::String(err.to_string())),
                    );
                    STATUS_FAILED
                }
            },
            _ => {
                print_error("unknown command", Some(json!(args)));
                STATUS_FAILED
            }
        }
    }

    /// Dispatches a parsed `get` command against the resolved target.
    async fn execute_get(&self, args: &GetArgs) -> Result<u8, CommandError> {
        let target = resolve_target(&args.path, self.endpoint.as_ref())?;
        let remote = target.remote_endpoint.as_deref();
        let has_attributes = !args.attributes.is_empty();
        let has_operations = !args.operations.is_empty();

        if args.comp_name.is_empty() {
            if target.component_type.is_empty() {
                if !has_attributes && !has_operations {
                    return Ok(self.get_component(ComponentKind::Broker, "", remote).await);
                }
                let mut status = STATUS_OK;
                if has_attributes {
                    let attrs = Filter::from_names(&args.attributes);
                    status = status.max(
                        self.get_component_attributes(ComponentKind::Broker, "", attrs, remote)
                            .await,
                    );
                }
                if has_operations {
                    let names = Filter::from_names(&args.operations);
                    status = status.max(
                        self.get_component_operations(ComponentKind::Broker, "", &names, remote)
                            .await,
                    );
                }
                return Ok(status);
            }
            if target.component_type == "*" {
                if has_attributes || has_operations {
                    return Err(CommandError::Usage(
                        "cannot specify attributes/operations for all components".to_string(),
                    ));
                }
                return Ok(self.get_all_broker_components(remote).await);
            }
            if has_attributes || has_operations {
                return Err(CommandError::Usage(
                    "need a component name to get attributes/operations of".to_string(),
                ));
            }
            let kind = ComponentKind::parse(&target.component_type)?;
            return Ok(self.get_all_components(kind, remote).await);
        }

        let kind = ComponentKind::parse(&target.component_type)?;
        if !has_attributes && !has_operations {
            return Ok(self.get_component(kind, &args.comp_name, remote).await);
        }
        let mut status = STATUS_OK;
        if has_attributes {
            let attrs = Filter::from_names(&args.attributes);
            status = status
                .max(self.get_component_attributes(kind, &args.comp_name, attrs, remote).await);
        }
        if has_operations {
            let names = Filter::from_names(&args.operations);
            status = status
                .max(self.get_component_operations(kind, &args.comp_name, &names, remote).await);
        }
        Ok(status)
    }

    /// Dispatches a parsed `run` command against the resolved target.
    async fn execute_run(&self, args: &RunArgs) -> Result<u8, CommandError> {
        let target = resolve_target(&args.path, self.endpoint.as_ref())?;
        let remote = target.remote_endpoint.as_deref();
        // Rejoin trailing tokens so argument literals may contain whitespace.
        let raw = normalize(&args.invocation.join(" "));
        let invocation = parse_invocation(&raw)?;

        if invocation.comp_name.is_empty() {
            if target.component_type.is_empty() {
                return Ok(self
                    .run_component_operation(
                        ComponentKind::Broker,
                        "",
                        &invocation.operation,
                        &invocation.arg_str,
                        remote,
                    )
                    .await);
            }
            return Err(CommandError::Usage(format!(
                "must specify a component name for type {}",
                target.component_type
            )));
        }

        let kind = ComponentKind::parse(&target.component_type)?;
        Ok(self
            .run_component_operation(
                kind,
                &invocation.comp_name,
                &invocation.operation,
                &invocation.arg_str,
                remote,
            )
            .await)
    }

    /// Reads the full component enumeration of the broker.
    async fn get_all_broker_components(&self, remote: Option<&str>) -> u8 {
        match self.client.read_broker_components(remote).await {
            Ok(result) => {
                print_result(&result);
                STATUS_OK
            }
            Err(err) => {
                print_error("failed to get broker components", Some(client_error_details(&err)));
                STATUS_FAILED
            }
        }
    }

    /// Lists all components of one kind.
    async fn get_all_components(&self, kind: ComponentKind, remote: Option<&str>) -> u8 {
        let result = match kind {
            ComponentKind::Broker => self.client.read_broker(remote).await,
            other => self.client.read_components(other, remote).await,
        };
        match result {
            Ok(listing) => {
                print_result(&listing);
                STATUS_OK
            }
            Err(err) => {
                let message = format!("failed to get {}", kind_plural(kind));
                print_error(&message, Some(client_error_details(&err)));
                STATUS_FAILED
            }
        }
    }

    /// Reads one component's listing entry, or the broker root descriptor.
    async fn get_component(&self, kind: ComponentKind, name: &str, remote: Option<&str>) -> u8 {
        if kind == ComponentKind::Broker {
            return self.get_all_components(kind, remote).await;
        }
        match self.client.read_components(kind, remote).await {
            Ok(listing) => {
                print_result(&filter_listing_by_name(&listing, name));
                STATUS_OK
            }
            Err(err) => {
                let message = format!("failed to get {}", kind_plural(kind));
                print_error(&message, Some(client_error_details(&err)));
                STATUS_FAILED
            }
        }
    }

    /// Reads attributes of one component per the name filter.
    async fn get_component_attributes(
        &self,
        kind: ComponentKind,
        name: &str,
        attrs: Filter,
        remote: Option<&str>,
    ) -> u8 {
        let requests = match self.attribute_requests(kind, name, attrs, remote).await {
            Ok(requests) => requests,
            Err(err) => {
                print_error("failed to get queues", Some(client_error_details(&err)));
                return STATUS_FAILED;
            }
        };
        let message = if kind == ComponentKind::Broker {
            "failed to read attributes".to_string()
        } else {
            format!("failed to read {} attributes", kind_label(kind))
        };
        for request in requests {
            match self.client.read_attributes(kind, &request, remote).await {
                Ok(values) => print_result(&values),
                Err(err) => {
                    print_error(&message, Some(client_error_details(&err)));
                    return STATUS_FAILED;
                }
            }
        }
        STATUS_OK
    }

    /// Fetches operation schemas of one component per the name filter.
    async fn get_component_operations(
        &self,
        kind: ComponentKind,
        name: &str,
        names: &Filter,
        remote: Option<&str>,
    ) -> u8 {
        let requests = match self.attribute_requests(kind, name, Filter::All, remote).await {
            Ok(requests) => requests,
            Err(err) => {
                print_error("failed to get queues", Some(client_error_details(&err)));
                return STATUS_FAILED;
            }
        };
        let message = if kind == ComponentKind::Broker {
            "failed to read operations".to_string()
        } else {
            format!("failed to read {} operations", kind_label(kind))
        };
        for request in requests {
            match self.client.read_operations(kind, &request, names, remote).await {
                Ok(operations) => {
                    let rendered = serde_json::to_value(&operations).unwrap_or(Value::Null);
                    print_result(&rendered);
                }
                Err(err) => {
                    print_error(&message, Some(client_error_details(&err)));
                    return STATUS_FAILED;
                }
            }
        }
        STATUS_OK
    }

    /// Builds the addressing requests for attribute and schema reads.
    ///
    /// Queues resolve their owning address and routing type from the queue
    /// listing first; every matching queue yields one request. Other kinds
    /// yield exactly one request.
    async fn attribute_requests(
        &self,
        kind: ComponentKind,
        name: &str,
        attrs: Filter,
        remote: Option<&str>,
    ) -> Result<Vec<AttributeRequest>, ClientError> {
        if kind == ComponentKind::Queue {
            let listing = self.client.read_components(ComponentKind::Queue, remote).await?;
            let requests = matching_queues(&listing, name)
                .into_iter()
                .map(|(address, routing_type)| AttributeRequest {
                    name: Some(name.to_string()),
                    address,
                    routing_type,
                    attrs: attrs.clone(),
                })
                .collect();
            return Ok(requests);
        }
        let component_name = (kind != ComponentKind::Broker).then(|| name.to_string());
        Ok(vec![AttributeRequest {
            name: component_name,
            address: None,
            routing_type: None,
            attrs,
        }])
    }

    /// Runs one operation: schema fetch, overload resolution, execution.
    async fn run_component_operation(
        &self,
        kind: ComponentKind,
        comp_name: &str,
        operation: &str,
        arg_str: &str,
        remote: Option<&str>,
    ) -> u8 {
        match self.resolve_and_invoke(kind, comp_name, operation, arg_str, remote).await {
            Ok(result) => {
                print_result(&result);
                STATUS_OK
            }
            Err(err) => {
                print_error("failed to run operation", Some(command_error_details(&err)));
                STATUS_FAILED
            }
        }
    }

    /// The two-stage operation pipeline behind [`Self::run_component_operation`].
    ///
    /// Stage one checks name-level cardinality of the fetched schema groups;
    /// stage two resolves the unique overload and executes it.
    async fn resolve_and_invoke(
        &self,
        kind: ComponentKind,
        comp_name: &str,
        operation: &str,
        arg_str: &str,
        remote: Option<&str>,
    ) -> Result<Value, CommandError> {
        let raw_args = split_args(arg_str);
        let request = self
            .attribute_requests(kind, comp_name, Filter::All, remote)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CommandError::Usage(format!("no such queue: {comp_name}")))?;

        let names = Filter::Names(vec![operation.to_string()]);
        let operations = self.client.read_operations(kind, &request, &names, remote).await?;
        if operations.is_empty() {
            return Err(OverloadError::UnknownOperation {
                operation: operation.to_string(),
            }
            .into());
        }
        if operations.len() != 1 {
            return Err(OverloadError::AmbiguousOperationName {
                operation: operation.to_string(),
            }
            .into());
        }
        let schemas = operations.get(operation).ok_or_else(|| OverloadError::UnknownOperation {
            operation: operation.to_string(),
        })?;
        let call_args = resolve_overload(operation, schemas, &raw_args)?;
        let signature = OperationSignature {
            name: operation.to_string(),
            args: call_args,
        };
        let name_param = (kind != ComponentKind::Broker).then_some(comp_name);
        Ok(self.client.invoke_operation(kind, name_param, &signature, remote).await?)
    }
}

// ============================================================================
// SECTION: Listing Helpers
// ============================================================================

/// Retains listing entries whose `name` field equals the component name.
fn filter_listing_by_name(listing: &Value, name: &str) -> Value {
    match listing.as_array() {
        Some(entries) => Value::Array(
            entries
                .iter()
                .filter(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
                .cloned()
                .collect(),
        ),
        None => listing.clone(),
    }
}

/// Extracts `(address, routing type)` pairs for queues matching a name.
fn matching_queues(listing: &Value, name: &str) -> Vec<(Option<String>, Option<String>)> {
    let Some(entries) = listing.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
        .map(|entry| {
            let address = entry
                .get("address")
                .and_then(|address| address.get("name"))
                .and_then(Value::as_str)
                .map(ToString::to_string);
            let routing_type = entry
                .get("routing-type")
                .and_then(Value::as_str)
                .map(ToString::to_string);
            (address, routing_type)
        })
        .collect()
}
