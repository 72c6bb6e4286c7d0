// crates/broker-gate-client/src/lib.rs
// ============================================================================
// Module: Broker Gate Client Library
// Description: HTTP implementation of the management API access client.
// Purpose: Expose the reqwest-backed client and its configuration.
// Dependencies: crate::http
// ============================================================================

//! ## Overview
//! The HTTP client speaks the management API server's `api/v1` surface:
//! availability probes, gateway and endpoint logins, component listing and
//! attribute reads, operation-schema fetches, and operation execution. All
//! requests are bounded by a timeout and a hard response-size limit, and
//! redirects are never followed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::HttpAccessClient;
pub use http::HttpClientConfig;
