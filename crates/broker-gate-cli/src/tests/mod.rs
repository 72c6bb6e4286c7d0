// crates/broker-gate-cli/src/tests/mod.rs
// ============================================================================
// Module: CLI Tests
// Description: Command-surface and registry tests over a recording client.
// Purpose: Pin dispatch, routing, and registry behavior without a network.
// Dependencies: crate test modules
// ============================================================================

//! ## Overview
//! The tests drive [`crate::context::CommandContext`] and
//! [`crate::interactive::InteractiveCommandContext`] against a recording
//! access client, asserting which backend calls each command line produces.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod context_tests;
mod interactive_tests;
mod support;
