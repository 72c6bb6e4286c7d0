// crates/broker-gate-core/src/lib.rs
// ============================================================================
// Module: Broker Gate Core Library
// Description: Public API surface for the Broker Gate core.
// Purpose: Expose target resolution, argument handling, and client interfaces.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Broker Gate core implements the command-path resolution and
//! operation-dispatch engine for Jolokia-fronted broker management: target
//! path parsing, the argument codec, type coercion against remote operation
//! schemas, and overload resolution. It is transport-agnostic and integrates
//! through the [`interfaces::AccessClient`] contract rather than embedding an
//! HTTP client.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::AccessClient;
pub use interfaces::AttributeRequest;
pub use interfaces::ClientError;
pub use interfaces::EndpointListing;
