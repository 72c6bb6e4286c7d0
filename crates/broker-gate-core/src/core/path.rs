// crates/broker-gate-core/src/core/path.rs
// ============================================================================
// Module: Target Path Resolution
// Description: Parses command target paths into component type and endpoint.
// Purpose: Disambiguate [[@]endpointName/]componentType expressions.
// Dependencies: crate::core::endpoint, thiserror
// ============================================================================

//! ## Overview
//! A target path selects what a command acts on:
//! `[[@]endpointName/]componentType`. A leading `@` names a gateway-proxied
//! endpoint. With no explicit endpoint, the current endpoint supplies one
//! only when it is itself remote; a local or absent current endpoint means
//! the bound access client is used directly.
//!
//! A bare single segment without `@` is always a component type, never an
//! endpoint name, and a non-`@` first segment in the two-segment form is
//! ignored as an endpoint source (so `broker0/` resolves to an empty
//! component type with no endpoint). Local-endpoint selection by bare name is
//! the interactive registry's job, not this parser's.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::endpoint::Endpoint;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Target path parsing errors.
#[derive(Debug, Error)]
pub enum PathError {
    /// The path has more than two `/`-separated segments.
    #[error("Invalid target expression: {path}")]
    InvalidTarget {
        /// Original path text.
        path: String,
    },
}

// ============================================================================
// SECTION: Resolved Target
// ============================================================================

/// The outcome of resolving a target path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Component type alias; empty selects the broker root.
    pub component_type: String,
    /// Gateway endpoint name, `None` when the bound client is used directly.
    pub remote_endpoint: Option<String>,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves a target path against the currently selected endpoint.
///
/// # Errors
///
/// Returns [`PathError::InvalidTarget`] when the path splits into more than
/// two segments.
pub fn resolve_target(
    path: &str,
    current: Option<&Endpoint>,
) -> Result<ResolvedTarget, PathError> {
    let mut component_type = String::new();
    let mut remote_endpoint: Option<String> = None;

    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        [single] => {
            if let Some(name) = single.strip_prefix('@') {
                remote_endpoint = Some(name.to_string());
            } else {
                component_type = (*single).to_string();
            }
        }
        [first, second] => {
            component_type = (*second).to_string();
            if let Some(name) = first.strip_prefix('@') {
                remote_endpoint = Some(name.to_string());
            }
        }
        _ => {
            return Err(PathError::InvalidTarget {
                path: path.to_string(),
            });
        }
    }

    if remote_endpoint.is_none()
        && let Some(Endpoint::Remote(remote)) = current
    {
        remote_endpoint = Some(remote.stripped_name().to_string());
    }

    Ok(ResolvedTarget {
        component_type,
        remote_endpoint,
    })
}
