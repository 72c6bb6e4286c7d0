// crates/broker-gate-core/src/core/mod.rs
// ============================================================================
// Module: Broker Gate Core Types
// Description: Data model and pure dispatch logic for broker management.
// Purpose: Group endpoint, component, schema, path, and argument modules.
// Dependencies: crate::core submodules
// ============================================================================

//! ## Overview
//! The core module owns the data model (endpoints, component kinds, operation
//! schemas) and the pure functions of the dispatch engine (path resolution,
//! argument codec, type coercion, overload resolution). Nothing here performs
//! I/O; network access lives behind [`crate::interfaces::AccessClient`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod args;
pub mod coerce;
pub mod component;
pub mod endpoint;
pub mod overload;
pub mod path;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use args::normalize;
pub use args::restore;
pub use args::split_args;
pub use args::strip_name;
pub use coerce::CoercionError;
pub use coerce::coerce;
pub use component::ComponentKind;
pub use component::ComponentKindError;
pub use endpoint::Endpoint;
pub use endpoint::EndpointError;
pub use endpoint::LocalEndpoint;
pub use endpoint::RemoteEndpoint;
pub use overload::OverloadError;
pub use overload::resolve_overload;
pub use path::PathError;
pub use path::ResolvedTarget;
pub use path::resolve_target;
pub use schema::Filter;
pub use schema::OperationArgument;
pub use schema::OperationMap;
pub use schema::OperationSchema;
pub use schema::OperationSignature;
pub use schema::ParameterDescriptor;
pub use schema::filter_operations;
