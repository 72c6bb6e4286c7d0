// crates/broker-gate-cli/src/output.rs
// ============================================================================
// Module: Command Output
// Description: Result and error rendering for the command boundary.
// Purpose: Print results as pretty JSON and failures as {message, details}.
// Dependencies: broker-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Every command prints its result as pretty JSON on stdout. Failures print a
//! `{message, details}` block on stderr, with transport failures reduced to
//! their status line. Output failures are swallowed at this boundary; a
//! command that cannot print has nothing better left to do.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use broker_gate_core::ClientError;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Printing
// ============================================================================

/// Prints a command result as pretty JSON on stdout.
pub(crate) fn print_result(result: &Value) {
    let rendered = serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
    let _ = write_stdout_line(&rendered);
}

/// Prints a `{message, details}` error block on stderr.
pub(crate) fn print_error(message: &str, details: Option<Value>) {
    let block = json!({
        "message": format!("Error: {message}"),
        "details": details.unwrap_or_else(|| Value::String(String::new())),
    });
    let rendered = serde_json::to_string_pretty(&block).unwrap_or_else(|_| block.to_string());
    let _ = write_stderr_line(&rendered);
}

/// Renders an access-client failure into an error-details value.
///
/// Server status failures keep only the status line; everything else is the
/// error text.
pub(crate) fn client_error_details(err: &ClientError) -> Value {
    match err {
        ClientError::Http {
            status,
            status_text,
            ..
        } => json!({
            "status": status,
            "statusText": status_text,
        }),
        other => Value::String(other.to_string()),
    }
}

// ============================================================================
// SECTION: Stream Helpers
// ============================================================================

/// Writes a single line to stdout.
pub(crate) fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a string to stdout without a trailing newline and flushes.
pub(crate) fn write_stdout_flush(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(&mut stdout, "{message}")?;
    stdout.flush()
}

/// Writes a single line to stderr.
pub(crate) fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}
