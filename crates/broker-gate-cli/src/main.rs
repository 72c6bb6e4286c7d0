// crates/broker-gate-cli/src/main.rs
// ============================================================================
// Module: Broker Gate CLI Entry Point
// Description: Command-line tool for the broker management API gateway.
// Purpose: Run one-shot get/run commands or an interactive endpoint session.
// Dependencies: broker-gate-client, broker-gate-config, broker-gate-core, clap, tokio
// ============================================================================

//! ## Overview
//! The CLI connects to a management API server that fronts message brokers,
//! probes its availability, optionally logs in, and then either executes one
//! command non-interactively or enters the interactive prompt with its
//! endpoint registry. Exit code `0` means success; failures print a
//! `{message, details}` block on stderr.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod context;
mod interactive;
mod output;
#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use broker_gate_client::HttpAccessClient;
use broker_gate_client::HttpClientConfig;
use broker_gate_config::load_config;
use broker_gate_core::AccessClient;
use clap::CommandFactory;
use clap::Parser;
use serde_json::Value;

use crate::context::CommandContext;
use crate::context::STATUS_OK;
use crate::interactive::InteractiveCommandContext;
use crate::output::print_error;
use crate::output::write_stderr_line;
use crate::output::write_stdout_flush;
use crate::output::write_stdout_line;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable carrying the gateway login user name.
const SERVER_USER_ENV: &str = "SERVER_USER_NAME";
/// Environment variable carrying the gateway login password.
const SERVER_PASSWORD_ENV: &str = "SERVER_PASSWORD";

/// Interactive commands shown by `help`.
const INTERACTIVE_COMMANDS: [(&str, &str); 6] = [
    ("list", "list endpoints"),
    ("add", "add a direct endpoint"),
    ("switch", "switch current endpoint"),
    ("get", "get component information"),
    ("run", "run a component operation"),
    ("exit", "exit the cli"),
];

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Command-line arguments of the broker-gate binary.
#[derive(Debug, Parser)]
#[command(name = "broker-gate", version, about = "CLI tool for the broker management API server")]
struct Cli {
    /// Command tokens executed non-interactively, e.g. `get /queues`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
    /// Management API server URL; overrides the config file value.
    #[arg(short = 'l', long = "url")]
    url: Option<String>,
    /// Run in interactive mode.
    #[arg(short = 'i', long = "interactive", default_value_t = false)]
    interactive: bool,
    /// Target endpoint URL for non-interactive commands.
    #[arg(short = 'e', long = "endpoint")]
    endpoint: Option<String>,
    /// User name to log in to the API server if security is enabled.
    #[arg(short = 'u', long = "user")]
    user: Option<String>,
    /// Password to log in to the API server.
    #[arg(short = 'p', long = "password")]
    password: Option<String>,
    /// Path to the configuration file.
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A fatal startup error carrying a user-facing message.
struct CliError {
    /// Human-readable error message.
    message: String,
    /// Optional structured details.
    details: Option<Value>,
}

impl CliError {
    /// Constructs a new [`CliError`] without details.
    const fn new(message: String) -> Self {
        Self {
            message,
            details: None,
        }
    }

    /// Constructs a new [`CliError`] with structured details.
    const fn with_details(message: String, details: Value) -> Self {
        Self {
            message,
            details: Some(details),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            print_error(&err.message, err.details);
            ExitCode::FAILURE
        }
    }
}

/// Connects to the API server, logs in when asked, and dispatches the mode.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load configuration: {err}")))?;
    let base_url = cli.url.clone().unwrap_or_else(|| config.api.url.clone());

    if config.api.tls_insecure {
        write_stderr_line("Warning: TLS certificate verification is disabled.")
            .map_err(|err| CliError::new(format!("failed to write to stderr: {err}")))?;
    }

    let client = HttpAccessClient::new(&HttpClientConfig {
        base_url: base_url.clone(),
        timeout_ms: config.api.request_timeout_ms,
        tls_insecure: config.api.tls_insecure,
        ..HttpClientConfig::default()
    })
    .map_err(|err| CliError::new(format!("failed to build api client: {err}")))?;
    let client: Arc<dyn AccessClient> = Arc::new(client);

    let available = client.check_api_server().await.unwrap_or(false);
    if !available {
        return Err(CliError::with_details(
            "The api server is not available".to_string(),
            Value::String(base_url),
        ));
    }

    let current_user = login_server(&*client, &cli).await?;

    if cli.interactive {
        run_interactive(client, current_user).await
    } else {
        run_single(client, &cli).await
    }
}

/// Resolves gateway credentials from flags or environment and logs in.
///
/// Returns the login identity when a login happened.
async fn login_server(client: &dyn AccessClient, cli: &Cli) -> CliResult<Option<String>> {
    let credentials = if let Some(user) = &cli.user {
        let password = cli
            .password
            .as_ref()
            .ok_or_else(|| CliError::new("no password".to_string()))?;
        Some((user.clone(), password.clone()))
    } else if let Ok(user) = std::env::var(SERVER_USER_ENV) {
        let password = std::env::var(SERVER_PASSWORD_ENV)
            .map_err(|_| CliError::new("no password".to_string()))?;
        Some((user, password))
    } else {
        None
    };

    let Some((user, password)) = credentials else {
        return Ok(None);
    };
    client.server_login(&user, &password).await.map_err(|err| {
        CliError::with_details(
            "Failed to login server".to_string(),
            Value::String(err.to_string()),
        )
    })?;
    Ok(Some(user))
}

// ============================================================================
// SECTION: Non-Interactive Mode
// ============================================================================

/// Executes exactly one command against an optional endpoint.
async fn run_single(client: Arc<dyn AccessClient>, cli: &Cli) -> CliResult<ExitCode> {
    let mut context = match &cli.endpoint {
        Some(endpoint_url) => CommandContext::from_endpoint_url(client, endpoint_url)
            .map_err(|err| CliError::new(format!("failed to run command: {err}")))?,
        None => CommandContext::new(client, None),
    };
    if let Err(err) = context.login().await {
        print_error("failed to login", Some(Value::String(err.to_string())));
        show_usage()?;
        return Ok(ExitCode::FAILURE);
    }

    let status = context.process_command(&cli.command).await;
    if status == STATUS_OK {
        return Ok(ExitCode::SUCCESS);
    }
    show_usage()?;
    Ok(ExitCode::FAILURE)
}

/// Prints the top-level usage text to stderr.
fn show_usage() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stderr_line(&help)
        .map_err(|err| CliError::new(format!("failed to write to stderr: {err}")))
}

// ============================================================================
// SECTION: Interactive Mode
// ============================================================================

/// Runs the interactive prompt until `exit` or end of input.
async fn run_interactive(
    client: Arc<dyn AccessClient>,
    current_user: Option<String>,
) -> CliResult<ExitCode> {
    let mut session = InteractiveCommandContext::new(client, current_user);
    write_stdout_line("Api Server Cli")
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))?;

    let stdin = std::io::stdin();
    loop {
        write_stdout_flush(&session.prompt())
            .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))?;
        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| CliError::new(format!("failed to read command: {err}")))?;
        if read == 0 {
            break;
        }
        let command = line.trim();
        if command == "exit" {
            break;
        }
        if command == "help" {
            show_interactive_help()?;
            continue;
        }
        let _ = session.process_single_command(command).await;
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints the interactive command summary.
fn show_interactive_help() -> CliResult<()> {
    write_stdout_line("Available commands:")
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))?;
    for (command, description) in INTERACTIVE_COMMANDS {
        write_stdout_line(&format!("{command} : {description}"))
            .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))?;
    }
    Ok(())
}
