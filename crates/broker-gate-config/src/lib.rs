// crates/broker-gate-config/src/lib.rs
// ============================================================================
// Module: Broker Gate Config Library
// Description: Public API surface for CLI configuration.
// Purpose: Expose the config model and loader.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration for the Broker Gate CLI: the management API server base URL,
//! request timeout, and TLS verification toggle. Loading is fail-closed with
//! strict size and field checks; a missing default file yields defaults, but
//! an explicitly named file must exist and validate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ApiConfig;
pub use config::CliConfig;
pub use config::ConfigError;
pub use config::load_config;
