// crates/broker-gate-cli/src/interactive.rs
// ============================================================================
// Module: Interactive Session Registry
// Description: Named endpoint registry behind the interactive prompt.
// Purpose: Manage add/switch/list plus get/run routing across endpoints.
// Dependencies: broker-gate-core, clap, serde_json, thiserror
// ============================================================================

//! ## Overview
//! An interactive session keeps a registry of named local endpoints, each
//! with its own [`CommandContext`], plus one current context the prompt acts
//! on. `add` authenticates and registers a new endpoint and switches to it;
//! `switch` replaces the current context; `list` shows local entries before
//! gateway-proxied ones. `get`/`run` first resolve which context executes:
//! `@`-paths and remote current endpoints stay on the session context, while
//! a path naming another registered endpoint delegates one-shot without
//! switching the session.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use broker_gate_core::AccessClient;
use broker_gate_core::Endpoint;
use broker_gate_core::EndpointListing;
use broker_gate_core::LocalEndpoint;
use broker_gate_core::RemoteEndpoint;
use clap::Parser;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::context::CommandContext;
use crate::context::STATUS_FAILED;
use crate::context::STATUS_OK;
use crate::context::command_error_details;
use crate::output::client_error_details;
use crate::output::print_error;
use crate::output::print_result;

// ============================================================================
// SECTION: Command Arguments
// ============================================================================

/// Arguments of the interactive `add` command.
#[derive(Debug, Parser)]
#[command(
    name = "add",
    about = "add an endpoint, example: add mybroker0 http://localhost:8161",
    disable_version_flag = true
)]
struct AddArgs {
    /// Registry name for the endpoint.
    name: String,
    /// Endpoint management URL.
    endpoint: String,
    /// User name presented to the endpoint.
    #[arg(short = 'u', long = "user", default_value = "user")]
    user: String,
    /// Password presented to the endpoint.
    #[arg(short = 'p', long = "password", default_value = "password")]
    password: String,
}

/// Arguments of the interactive `switch` command.
#[derive(Debug, Parser)]
#[command(name = "switch", about = "switch to an endpoint", disable_version_flag = true)]
struct SwitchArgs {
    /// Registered endpoint name, or `@name` for a gateway endpoint.
    endpoint_name: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Endpoint registry errors.
#[derive(Debug, Error)]
enum RegistryError {
    /// The name is already registered; `add` never overwrites.
    #[error("endpoint already exists!")]
    DuplicateEndpoint,
    /// The named endpoint is not in the registry.
    #[error("no such endpoint")]
    EndpointNotFound,
    /// The registry is empty; local commands have nothing to act on.
    #[error("there is no endpoint for command")]
    NoEndpoints,
    /// A command path named a local endpoint that is not registered.
    #[error("target endpoint not exist: {name}")]
    UnknownTarget {
        /// Requested endpoint name.
        name: String,
    },
}

// ============================================================================
// SECTION: Execution Routing
// ============================================================================

/// Which context executes a routed `get`/`run` command.
enum Route {
    /// Execute on the session's current context.
    Current,
    /// Execute one-shot on the named registered endpoint's context.
    Delegate(String),
}

// ============================================================================
// SECTION: Interactive Context
// ============================================================================

/// The interactive session: a current context plus the endpoint registry.
///
/// # Invariants
/// - Registry names are unique; `add` never overwrites.
/// - Registration order is preserved for `list`.
/// - Delegated execution leaves the session's current endpoint unchanged.
pub(crate) struct InteractiveCommandContext {
    /// Context the prompt currently acts on.
    context: CommandContext,
    /// Gateway login identity shown in the prompt, if any.
    current_user: Option<String>,
    /// Registered local endpoints by name.
    endpoints: BTreeMap<String, CommandContext>,
    /// Registration order of endpoint names.
    order: Vec<String>,
}

impl InteractiveCommandContext {
    /// Creates an interactive session with an empty registry.
    pub(crate) fn new(client: Arc<dyn AccessClient>, current_user: Option<String>) -> Self {
        Self {
            context: CommandContext::new(client, None),
            current_user,
            endpoints: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Renders the prompt from the login identity and current endpoint.
    pub(crate) fn prompt(&self) -> String {
        let endpoint_name = self.context.endpoint().map(Endpoint::broker_name);
        match (&self.current_user, endpoint_name) {
            (Some(user), Some(name)) => format!("{user}:{name}> "),
            (None, Some(name)) => format!("{name}> "),
            (Some(user), None) => format!("{user}> "),
            (None, None) => "> ".to_string(),
        }
    }

    /// Executes one interactive command line and returns its status.
    pub(crate) async fn process_single_command(&mut self, line: &str) -> u8 {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return STATUS_OK;
        }
        // Single-space splitting keeps runs of spaces inside argument literals.
        let args: Vec<String> = trimmed.split(' ').map(ToString::to_string).collect();
        match args.first().map(String::as_str) {
            None => STATUS_OK,
            Some("add") => self.add_endpoint(&args).await,
            Some("list") => self.list_endpoints().await,
            Some("switch") => self.switch_endpoint(&args),
            Some("get" | "run") => {
                let route = match self.route_for_command(args.get(1).map(String::as_str)) {
                    Ok(route) => route,
                    Err(err) => {
                        print_error("failed to get context", Some(Value::String(err.to_string())));
                        return STATUS_FAILED;
                    }
                };
                let command = vec![line.trim().to_string()];
                match route {
                    Route::Current => self.context.process_command(&command).await,
                    Route::Delegate(name) => match self.endpoints.get(&name) {
                        Some(target) => target.process_command(&command).await,
                        None => STATUS_FAILED,
                    },
                }
            }
            Some(_) => {
                print_error("unknown command", None);
                STATUS_FAILED
            }
        }
    }

    /// Registers a new local endpoint, authenticates it, and switches to it.
    async fn add_endpoint(&mut self, args: &[String]) -> u8 {
        let add = match AddArgs::try_parse_from(args) {
            Ok(add) => add,
            Err(err) => {
                print_error("failed to execute add command", Some(Value::String(err.to_string())));
                return STATUS_FAILED;
            }
        };
        if self.endpoints.contains_key(&add.name) {
            print_error(&RegistryError::DuplicateEndpoint.to_string(), None);
            return STATUS_FAILED;
        }
        let local = match LocalEndpoint::from_url(&add.name, &add.endpoint, &add.user, &add.password)
        {
            Ok(local) => local,
            Err(err) => {
                print_error("failed to execute add command", Some(Value::String(err.to_string())));
                return STATUS_FAILED;
            }
        };
        let mut context = CommandContext::new(self.context.client(), Some(Endpoint::Local(local)));
        if let Err(err) = context.login().await {
            print_error("failed to login", Some(command_error_details(&err)));
            return STATUS_FAILED;
        }
        self.endpoints.insert(add.name.clone(), context.clone());
        self.order.push(add.name);
        self.context.adopt(&context);
        STATUS_OK
    }

    /// Switches the current context to a registered or gateway endpoint.
    fn switch_endpoint(&mut self, args: &[String]) -> u8 {
        let switch = match SwitchArgs::try_parse_from(args) {
            Ok(switch) => switch,
            Err(err) => {
                print_error(
                    "failed to execute switch command",
                    Some(Value::String(err.to_string())),
                );
                return STATUS_FAILED;
            }
        };
        if switch.endpoint_name.starts_with('@') {
            // Gateway endpoints are transient; the gateway resolves them per call.
            self.context.set_endpoint(Endpoint::Remote(RemoteEndpoint::new(switch.endpoint_name)));
            return STATUS_OK;
        }
        match self.endpoints.get(&switch.endpoint_name) {
            Some(target) => {
                let target = target.clone();
                self.context.adopt(&target);
                STATUS_OK
            }
            None => {
                print_error(
                    &RegistryError::EndpointNotFound.to_string(),
                    Some(Value::String(switch.endpoint_name)),
                );
                STATUS_FAILED
            }
        }
    }

    /// Renders registry lines: locals in registration order, then proxied.
    pub(crate) fn endpoint_lines(&self, listings: &[EndpointListing]) -> Vec<String> {
        let mut lines = Vec::new();
        for name in &self.order {
            if let Some(context) = self.endpoints.get(name) {
                let url = context.endpoint().map(Endpoint::url).unwrap_or_default();
                lines.push(format!("{name}(local): {url}"));
            }
        }
        for listing in listings {
            lines.push(format!("@{}: {}", listing.name, listing.url));
        }
        lines
    }

    /// Lists registered local endpoints, then gateway-proxied ones.
    async fn list_endpoints(&self) -> u8 {
        let listings = match self.context.client().list_proxied_endpoints().await {
            Ok(listings) => listings,
            Err(err) => {
                print_error("failed to list endpoints", Some(client_error_details(&err)));
                return STATUS_FAILED;
            }
        };
        print_result(&json!(self.endpoint_lines(&listings)));
        STATUS_OK
    }

    /// Resolves which context executes a `get`/`run` command path.
    ///
    /// `@`-paths and remote current endpoints stay on the session context.
    /// A two-segment path naming another registered endpoint delegates
    /// one-shot; an unknown local name or an empty registry is an error.
    fn route_for_command(&self, path: Option<&str>) -> Result<Route, RegistryError> {
        let Some(path) = path else {
            return Ok(Route::Current);
        };
        let is_remote_target = path.starts_with('@')
            || self.context.endpoint().is_some_and(Endpoint::is_remote);
        if is_remote_target {
            return Ok(Route::Current);
        }
        if self.endpoints.is_empty() {
            return Err(RegistryError::NoEndpoints);
        }
        let segments: Vec<&str> = path.split('/').collect();
        if let [first, _] = segments.as_slice()
            && !first.is_empty()
        {
            if !self.endpoints.contains_key(*first) {
                return Err(RegistryError::UnknownTarget {
                    name: (*first).to_string(),
                });
            }
            let is_current = self
                .context
                .endpoint()
                .is_some_and(|endpoint| endpoint.broker_name() == *first);
            if !is_current {
                return Ok(Route::Delegate((*first).to_string()));
            }
        }
        Ok(Route::Current)
    }
}
